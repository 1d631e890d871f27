use std::fmt::Display;

use colored::*;
use compass_common::config::Config;
use tracing::info;
use unicode_width::UnicodeWidthStr;

use crate::terminal::colors;
use crate::terminal::format::Detail;

pub const TOTAL_WIDTH: usize = 64;
const TREE_KEY_WIDTH: usize = 7;

#[macro_export]
macro_rules! mprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

pub fn initialize(cfg: &Config) {
    if cfg.no_color {
        colored::control::set_override(false);
    }
}

/// Emits a line verbatim; the formatter skips the level marker for this target.
pub fn print(msg: &str) {
    info!(target: "compass::print", raw_msg = msg);
}

const BANNER: &str = r#"
       ___ ___  __  __ ___  _   ___ ___
      / __/ _ \|  \/  | _ \/_\ / __/ __|
     | (_| (_) | |\/| |  _/ _ \\__ \__ \
      \___\___/|_|  |_|_|/_/ \_\___/___/
"#;

pub fn banner(cfg: &Config) {
    if cfg.no_banner || cfg.quiet > 0 {
        return;
    }

    let title = format!("⟦ COMPASS v{} ⟧", env!("CARGO_PKG_VERSION"));
    print(&format!("{}", BANNER.color(colors::PRIMARY).bold()));
    print(&framed(&title.bright_green().bold().to_string(), '═'));
}

/// Section title centred in a thin rule, hidden when quiet.
pub fn section(title: &str, cfg: &Config) {
    if cfg.quiet > 0 {
        return;
    }
    let label = format!("⟦ {} ⟧", title.to_uppercase());
    print(&framed(&label.bright_green().to_string(), '─'));
}

/// `key....: value`, with dots padding every key to `key_width`.
pub fn field(key: &str, key_width: usize, value: impl Display) {
    let dots = ".".repeat((key_width + 1).saturating_sub(key.width()));
    note(format!(
        "{}{}{} {}",
        key.color(colors::PRIMARY),
        dots.color(colors::SEPARATOR),
        ":".color(colors::SEPARATOR),
        value.to_string().color(colors::TEXT_DEFAULT)
    ));
}

pub fn note<T: AsRef<str>>(msg: T) {
    print(&format!("{} {}", ">".color(colors::SEPARATOR), msg.as_ref()));
}

/// `[idx] Name` followed by one branch per detail.
pub fn company_tree(idx: usize, name: &str, details: &[Detail]) {
    print(&format!(
        "{}{}{} {}",
        "[".color(colors::SEPARATOR),
        idx.to_string().color(colors::ACCENT),
        "]".color(colors::SEPARATOR),
        name.color(colors::PRIMARY).bold()
    ));

    for (i, (key, value)) in details.iter().enumerate() {
        let branch = if i + 1 == details.len() { "└─" } else { "├─" };
        print(&format!(
            " {} {}{}{} {}",
            branch.bright_black(),
            key.color(colors::TEXT_DEFAULT),
            ".".repeat(TREE_KEY_WIDTH.saturating_sub(key.width())).color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR),
            value
        ));
    }
}

/// Heavy rule with `msg` centred underneath.
pub fn summary(msg: &str) {
    closing_rule();
    let pad = TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2;
    print(&format!("{}{}", " ".repeat(pad), msg));
}

pub fn closing_rule() {
    print(&"═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR).to_string());
}

const NO_RESULTS: &str = r#"
         _   _  ___    ____ ___  __  __ ____   _    _   _ ___ _____ ____
        | \ | |/ _ \  / ___/ _ \|  \/  |  _ \ / \  | \ | |_ _| ____/ ___|
        |  \| | | | || |  | | | | |\/| | |_) / _ \ |  \| || ||  _| \___ \
        | |\  | |_| || |__| |_| | |  | |  __/ ___ \| |\  || || |___ ___) |
        |_| \_|\___/  \____\___/|_|  |_|_| /_/   \_\_| \_|___|_____|____/
"#;

pub fn no_results() {
    print(&format!("{}", NO_RESULTS.red().bold()));
}

/// Centres `label` (which may carry colour codes) in a line of `fill`.
fn framed(label: &str, fill: char) -> String {
    let free = TOTAL_WIDTH.saturating_sub(console::measure_text_width(label));
    let left = free / 2;
    let right = free - left;
    format!(
        "{}{}{}",
        fill.to_string().repeat(left).bright_black(),
        label,
        fill.to_string().repeat(right).bright_black()
    )
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
