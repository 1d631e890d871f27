use compass_common::company::CompanyStatus;
use compass_common::config::Config;

use crate::terminal::print;

pub fn statuses(cfg: &Config) -> anyhow::Result<()> {
    print::section("company statuses", cfg);

    let selectable = CompanyStatus::selectable();
    let key_width: usize = selectable
        .iter()
        .map(|status| status.as_str().len())
        .max()
        .unwrap_or(0);

    for status in &selectable {
        let example: String = format!("--status \"{}\"", status.as_str().to_lowercase());
        print::field(status.as_str(), key_width, example);
    }
    Ok(())
}
