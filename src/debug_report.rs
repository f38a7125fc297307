use blipspeak::{ParseReport, StepSummary};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

const MAX_STEPS_SHOWN: usize = 40;

pub fn print_run(report: &ParseReport, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Tokenizing: \"{}\"", report.text), ansi::CYAN)));

    // Per-step trace
    println!("\n{}", palette.paint("━━━ Steps ━━━", ansi::GRAY));
    print_steps(report, &palette);

    // Tokens
    println!("\n{}", palette.paint("━━━ Tokens ━━━", ansi::GRAY));
    if report.tokens.is_empty() {
        println!("{}", palette.dim("  No tokens produced"));
    } else {
        println!(
            "  {}  {}",
            palette.bold(palette.paint(report.tokens.join(" "), ansi::GREEN)),
            palette.dim(format!("({} clips)", report.tokens.len()))
        );
    }

    if let Some(err) = &report.error {
        println!("\n{}", palette.paint("━━━ Unmatched ━━━", ansi::GRAY));
        println!("  {}", palette.paint(format!("✗ {err}"), ansi::YELLOW));
        println!("  • Every position of the input needs some rule to match");
        println!("  • A low-priority catch-all rule is the usual fix");
        println!("\n{}", palette.dim("  Tip: Set BLIPSPEAK_DEBUG_RULES=1 to see per-step rule traces"));
    }

    // Timing
    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Probes: {}",
        palette.paint(format!("{:?}", report.elapsed), ansi::GREEN),
        palette.paint(report.probes.to_string(), ansi::BLUE),
    );
    println!();
}

fn print_steps(report: &ParseReport, palette: &ansi::Palette) {
    if report.steps.is_empty() {
        println!("{}", palette.dim("  No steps (empty input)"));
        return;
    }

    for step in report.steps.iter().take(MAX_STEPS_SHOWN) {
        println!("  {}", fmt_step_compact(step, palette));
    }
    if report.steps.len() > MAX_STEPS_SHOWN {
        println!("  {}", palette.dim(format!("... +{} more", report.steps.len() - MAX_STEPS_SHOWN)));
    }
}

fn fmt_step_compact(step: &StepSummary, palette: &ansi::Palette) -> String {
    format!(
        "{} {} {} {}",
        palette.paint(format!("{:>4}..{:<4}", step.offset, step.offset + step.consumed), ansi::YELLOW),
        palette.bold(palette.paint(format!("{:8}", step.output), ansi::GREEN)),
        palette.paint(&step.rule, ansi::BLUE),
        palette.dim(format!("(priority {})", step.priority)),
    )
}
