//! CTA rail route names.

/// Expand a Train Tracker route code into the line name riders know.
///
/// Codes the feed already spells out (`Red`, `Blue`, `Pink`) and unknown
/// codes pass through unchanged.
///
/// ```
/// use arrival_board::domain::train_line_name;
///
/// assert_eq!(train_line_name("Brn"), "Brown");
/// assert_eq!(train_line_name("Red"), "Red");
/// ```
pub fn train_line_name(route: &str) -> &str {
    match route {
        "Brn" => "Brown",
        "G" => "Green",
        "Org" => "Orange",
        "P" => "Purple",
        "Y" => "Yellow",
        other => other,
    }
}
