//! Renders a simulation input file from a template and parameter values.
//!
//! Placeholders look like `{{cooling_time}}`. Every placeholder in the
//! template must have a value — a rendered input with a hole in it would
//! only fail later, inside the engine, with a much worse message.

use crate::error::{SweepError, SweepResult};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Substitute `vars` into the template at `template_path` and write the
/// result to `output_path`. Values the template never mentions are ignored.
pub fn render_template(
    template_path: &Path,
    vars: &HashMap<String, String>,
    output_path: &Path,
) -> SweepResult<()> {
    let template = fs::read_to_string(template_path)?;
    let rendered = render_str(&template, vars, template_path)?;
    fs::write(output_path, rendered)?;
    log::info!(
        "rendered {} -> {}",
        template_path.display(),
        output_path.display()
    );
    Ok(())
}

fn render_str(
    template: &str,
    vars: &HashMap<String, String>,
    template_path: &Path,
) -> SweepResult<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after.find("}}").ok_or_else(|| SweepError::UnknownPlaceholder {
            name: after.chars().take(24).collect(),
            template: template_path.to_path_buf(),
        })?;
        let name = after[..end].trim();
        let value = vars.get(name).ok_or_else(|| SweepError::UnknownPlaceholder {
            name: name.to_string(),
            template: template_path.to_path_buf(),
        })?;
        out.push_str(value);
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn substitutes_all_placeholders() {
        let rendered = render_str(
            "<handle>{{handle}}</handle><cooling>{{ cooling_time }}</cooling>",
            &vars(&[("handle", "CT5"), ("cooling_time", "60")]),
            Path::new("t.xml.in"),
        )
        .unwrap();
        assert_eq!(rendered, "<handle>CT5</handle><cooling>60</cooling>");
    }

    #[test]
    fn unmapped_placeholder_is_an_error() {
        let err = render_str(
            "<cooling>{{cooling_time}}</cooling>",
            &vars(&[("handle", "CT5")]),
            Path::new("t.xml.in"),
        )
        .unwrap_err();
        assert!(matches!(err, SweepError::UnknownPlaceholder { ref name, .. } if name == "cooling_time"));
    }

    #[test]
    fn unterminated_placeholder_is_an_error() {
        assert!(render_str("<a>{{oops</a>", &vars(&[]), Path::new("t.xml.in")).is_err());
    }
}
