//! HTML assembly for the dashboard page.

use crate::data::Totals;

const STYLE: &str = "<style>\n\
    body { font-family: sans-serif; margin: 2em; }\n\
    table { border-collapse: collapse; margin-top: 1em; }\n\
    th, td { border: 1px solid #999; padding: 0.4em 1em; text-align: right; }\n\
    th { background: #eee; }\n\
</style>\n";

/// Build the dashboard page around a rendered chart and the latest totals.
pub fn format_page(totals: &Totals, chart_uri: &str) -> String {
    let mut page = String::new();

    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    page.push_str("<meta charset=\"utf-8\">\n");
    page.push_str("<title>Clone Detector Monitor</title>\n");
    page.push_str(STYLE);
    page.push_str("</head>\n<body>\n");
    page.push_str("<h1>Clone Detector Monitor</h1>\n");

    page.push_str(&format!(
        "<img alt=\"Per-minute deltas\" src=\"{}\">\n",
        chart_uri
    ));

    page.push_str("<table>\n");
    page.push_str("<tr><th>Files</th><th>Clones</th><th>Chunks</th><th>Candidates</th></tr>\n");
    page.push_str(&format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
        totals.files, totals.clones, totals.chunks, totals.candidates
    ));
    page.push_str("</table>\n");

    page.push_str("</body>\n</html>\n");
    page
}
