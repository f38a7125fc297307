#[macro_export]
macro_rules! pat {
    ($pattern:literal, $priority:expr) => {
        $crate::engine::Rule::pattern_passthrough($pattern, $priority).unwrap()
    };
}

#[macro_export]
macro_rules! pat_sub {
    ($pattern:literal, $output:expr, $priority:expr) => {
        $crate::engine::Rule::pattern_substitute($pattern, $output, $priority).unwrap()
    };
}

#[macro_export]
macro_rules! pat_rw {
    ($pattern:literal, $replacement:expr, $priority:expr) => {
        $crate::engine::Rule::pattern_rewrite($pattern, $replacement, $priority).unwrap()
    };
}
