//! HTML rendering for the search form and results.

use crate::scanner::ScanReport;
use crate::types::{OctetRange, Subnet};
use std::fmt::Write;

/// Search form pre-filled with `defaults`.
pub fn home_page(subnet: &Subnet, defaults: &OctetRange) -> String {
    format!(
        r#"<html>
  <head>
    <title>Electrolyser Search</title>
  </head>
  <body>
    <div>
      <h1>Search for electrolysers in the local subnet {subnet}</h1>
      <form action="/search" method="POST">
        <span style="font-size:x-large">
        Search Addresses from <input name="from" type="number" min="0" max="255" value="{from}" style="font-size:x-large" /> to <input name="to" type="number" min="0" max="255" value="{to}" style="font-size:x-large" /><br />
        <input style="font-size:x-large" type="submit" value="Search" />
        </span>
      </form>
    </div>
  </body>
</html>
"#,
        from = defaults.start(),
        to = defaults.end(),
    )
}

/// Results list, or the absence summary when nothing answered.
pub fn results_page(report: &ScanReport) -> String {
    let mut html = String::from(
        "<html><head><title>Results from Electrolyser Search</title></head><body><ul>\n",
    );

    let mut any = false;
    for result in report.found() {
        if let Some(serial) = result.outcome.serial() {
            any = true;
            // Writing to a String cannot fail.
            let _ = write!(
                html,
                "<li>Found electrolyser at {} with serial number {}</li>",
                result.address, serial
            );
        }
    }

    html.push_str("</ul>");
    if !any {
        let _ = write!(html, "<h1>{}</h1>", report.absence_summary());
    }
    html.push_str("\n</body></html>\n");
    html
}

/// Inline error body for rejected requests.
pub fn error_body(err: &dyn std::error::Error) -> String {
    format!("Error - {err}")
}
