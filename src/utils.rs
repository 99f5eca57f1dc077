/// Common utility functions.
use crate::ranges::FieldValue;

/// Converts string of decimal digits into unsigned number.
///
/// Signs, spaces and any other non-digit characters are rejected.
/// Range bounds aren't checked here.
pub(crate) fn parse_digital_value(input: &str) -> Option<FieldValue> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        None
    } else {
        input.parse::<FieldValue>().ok()
    }
}

/// Splits field into list of fragments by commas.
///
/// A comma at the very beginning or at the very end of the field isn't a separator,
/// it stays a part of the first/last fragment.
pub(crate) fn split_list(input: &str) -> Vec<&str> {
    if input.is_empty() {
        return vec![input];
    }

    let last = input.len() - 1;
    let mut fragments = Vec::new();
    let mut start = 0;
    for (pos, _) in input.match_indices(',') {
        if pos == 0 || pos == last {
            continue;
        }
        fragments.push(&input[start..pos]);
        start = pos + 1;
    }
    fragments.push(&input[start..]);

    fragments
}

/// Replaces every mnemonic value (case-insensitive) with its numeric equivalent,
/// i.e. `mon-FRI` becomes `1-5` for days of week.
pub(crate) fn replace_mnemonics(input: &str, values: &[&str], starter_shift: FieldValue) -> String {
    let mut result = input.to_owned();
    for (index, value) in values.iter().enumerate() {
        let replacement = (index as FieldValue + starter_shift).to_string();
        // ASCII uppercase keeps byte positions intact
        while let Some(pos) = result.to_ascii_uppercase().find(value) {
            result.replace_range(pos..pos + value.len(), &replacement);
        }
    }

    result
}
