#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Reduces terminal output.
    ///
    /// `1` drops headers and the banner, `2` prints only the summary.
    pub quiet: u8,
    pub no_banner: bool,
    /// Strips ANSI colours from everything we print.
    pub no_color: bool,
    /// Never wait for a key press, even on an interactive terminal.
    pub disable_input: bool,
}
