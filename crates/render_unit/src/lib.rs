// crates/render_unit/src/lib.rs

use askama::Template;
use unit_config::UnitConfig;

/// Askama template for a `[Unit]/[Service]/[Install]` systemd service file.
///
/// Values are substituted verbatim; systemd has no escaping convention the
/// template could apply.
#[derive(Template, Debug)]
#[template(path = "systemd.service", escape = "none")]
struct ServiceTemplate<'a> {
    description: &'a str,
    after: &'a str,
    command: &'a str,
    working_directory: &'a str,
}

/// Renders the unit file body for the given configuration.
///
/// The unit name is not part of the body; it only names the output file.
/// The returned text always ends with exactly one newline.
pub fn render_unit(config: &UnitConfig) -> askama::Result<String> {
    let template = ServiceTemplate {
        description: &config.description,
        after: &config.after,
        command: &config.command,
        working_directory: &config.working_directory,
    };
    let mut rendered = template.render()?;

    // askama drops the template file's trailing newline; put exactly one back.
    let trimmed_len = rendered.trim_end_matches('\n').len();
    rendered.truncate(trimmed_len);
    rendered.push('\n');
    Ok(rendered)
}
