//! Endpoint path templates.
//!
//! Templates contain `{name}` placeholders. Values are percent-encoded as a
//! single path segment, so names containing `/` or spaces cannot escape their
//! segment. Both flat (`/api/v1/repositories/{name}`) and nested
//! (`/api/v1/volumes/{volume_id}/repositories/{repository}`) shapes render the
//! same way; which one an endpoint uses is decided by its façade.

use url::form_urlencoded::byte_serialize;

use crate::ClientError;

/// Replaces every `{name}` placeholder in `template` with its value from `params`.
///
/// Returns [`ClientError::MissingPathParameter`] when a placeholder has no value.
/// Extra entries in `params` are ignored.
pub fn render_path(
    template: &'static str,
    params: &[(&str, &str)],
) -> Result<String, ClientError> {
    let mut rendered = String::with_capacity(template.len());
    let mut rest: &'static str = template;

    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let parameter = &rest[start + 1..start + len];
        let value = params
            .iter()
            .find(|(key, _)| *key == parameter)
            .map(|(_, value)| *value)
            .ok_or(ClientError::MissingPathParameter {
                template,
                parameter,
            })?;

        rendered.push_str(&rest[..start]);
        rendered.push_str(&encode_path_segment(value));
        rest = &rest[start + len + 1..];
    }

    rendered.push_str(rest);
    Ok(rendered)
}

fn encode_path_segment(value: &str) -> String {
    // `byte_serialize` targets form bodies where a space becomes `+`; a literal
    // `+` is already emitted as `%2B`, so this only rewrites spaces.
    byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
