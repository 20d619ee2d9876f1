use crate::types::AttributionRecord;

/// Two-letter placeholders, tried before the one-letter ones so that
/// `%cp` is never read as `%c` followed by `p`.
const LONG_PLACEHOLDERS: [&str; 4] = ["rd", "rp", "cp", "kg"];
const SHORT_PLACEHOLDERS: [&str; 4] = ["m", "s", "c", "k"];

fn field<'a>(record: &'a AttributionRecord, name: &str) -> Option<&'a str> {
    let value = match name {
        "rd" => &record.referring_domain,
        "rp" => &record.referring_path,
        "m" => &record.medium,
        "s" => &record.source,
        "cp" => &record.campaign,
        "c" => &record.content,
        "kg" => &record.keyword_group,
        "k" => &record.keyword,
        _ => return None,
    };
    Some(value.as_str())
}

/// Fill `%rd %rp %m %s %cp %c %kg %k` in a rule template from the record.
///
/// Single left-to-right pass: substituted values are not rescanned and
/// unknown placeholders are copied through untouched.
pub fn format(template: &str, record: &AttributionRecord) -> String {
    let mut result = String::with_capacity(template.len() + 32);
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        result.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        let placeholder = LONG_PLACEHOLDERS
            .iter()
            .chain(SHORT_PLACEHOLDERS.iter())
            .find(|name| after.starts_with(**name));

        match placeholder.and_then(|name| field(record, name).map(|v| (name.len(), v))) {
            Some((consumed, value)) => {
                result.push_str(value);
                rest = &after[consumed..];
            }
            None => {
                result.push('%');
                rest = after;
            }
        }
    }

    result.push_str(rest);
    result
}
