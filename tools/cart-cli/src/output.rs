//! Terminal and JSON output for cart commands.

use console::{style, Term};
use foodie_cart::prelude::{Coupon, CouponValue, Currency, Money};

/// Writes human output to the terminal, or JSON documents in `--json` mode.
///
/// In JSON mode every decorative line is suppressed so stdout carries a
/// single parseable document.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
    out: Term,
    err: Term,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self {
            verbose,
            json,
            out: Term::stdout(),
            err: Term::stderr(),
        }
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Write a line to stdout unless in JSON mode.
    fn line(&self, text: String) {
        if !self.json {
            let _ = self.out.write_line(&text);
        }
    }

    /// Write a line to stderr.
    fn err_line(&self, text: String) {
        let _ = self.err.write_line(&text);
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        self.line(format!("{} {}", style("ℹ").blue(), msg));
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        self.line(format!("{} {}", style("✓").green(), msg));
    }

    /// Warnings go to stderr and are dropped in JSON mode.
    pub fn warn(&self, msg: &str) {
        if !self.json {
            self.err_line(format!("{} {}", style("⚠").yellow(), msg));
        }
    }

    /// Errors are always printed; as `{"error": ...}` in JSON mode.
    pub fn error(&self, msg: &str) {
        if self.json {
            self.err_line(serde_json::json!({ "error": msg }).to_string());
        } else {
            self.err_line(format!("{} {}", style("✗").red(), style(msg).red()));
        }
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if self.verbose && !self.json {
            self.err_line(format!("{} {}", style("→").dim(), style(msg).dim()));
        }
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        self.line(format!("\n{}", style(msg).bold().underlined()));
    }

    /// A restaurant group heading inside the cart table.
    pub fn group(&self, msg: &str) {
        self.line(format!(" {}", style(msg).cyan()));
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        self.line(format!("  {}: {}", style(key).dim(), value));
    }

    /// A right-aligned amount row, as on a receipt.
    pub fn amount(&self, label: &str, amount: &str) {
        self.line(format!("  {:<24}{:>12}", label, amount));
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        self.line(format!("  {}", formatted.join("  ").trim_end()));
    }

    /// Print `value` as pretty JSON on stdout.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => {
                let _ = self.out.write_line(&json);
            }
            Err(e) => self.error(&format!("Failed to encode output: {}", e)),
        }
    }
}

/// Eligibility badge for a coupon against the current total.
pub fn coupon_badge(coupon: &Coupon, total: Money) -> String {
    if !coupon.is_active {
        style("inactive").dim().to_string()
    } else if coupon.is_eligible_for(total) {
        style("eligible").green().to_string()
    } else {
        style("below minimum").yellow().to_string()
    }
}

/// Human-readable coupon value, e.g. `20% (max ₹100)` or `₹50 off`.
pub fn format_coupon_value(value: &CouponValue, currency: Currency) -> String {
    match value {
        CouponValue::Percentage {
            percent,
            max_discount: Some(cap),
        } => format!("{}% (max {})", percent, cap.display(currency)),
        CouponValue::Percentage {
            percent,
            max_discount: None,
        } => format!("{}%", percent),
        CouponValue::Flat(amount) => format!("{} off", amount.display(currency)),
    }
}
