pub const CONTENT_REQUEST: &str = include_str!("../data/prompts/content_request.txt");
pub const POSTER_IMAGE: &str = include_str!("../data/prompts/poster_image.txt");

/// Replace `{{key}}` placeholders in a template string.
///
/// Substitution is a single pass over the template, so values that happen to
/// contain `{{...}}` are copied through untouched. Unknown placeholders are
/// left as-is.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        result.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        match after_open.find("}}") {
            Some(end) => {
                let key = &after_open[..end];
                match vars.iter().find(|(name, _)| *name == key) {
                    Some((_, value)) => result.push_str(value),
                    None => {
                        result.push_str("{{");
                        result.push_str(key);
                        result.push_str("}}");
                    }
                }
                rest = &after_open[end + 2..];
            }
            None => {
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    result.push_str(rest);
    result
}
