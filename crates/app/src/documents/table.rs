//! Plain-text receipts laid out with `tabled`.

use std::fmt::Write;

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Style, Theme,
        object::{Columns, Rows},
    },
};

use super::{DocumentRenderer, ReceiptDocument, RenderError};

/// Renders receipts as a UTF-8 text table.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableReceiptRenderer;

impl TableReceiptRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DocumentRenderer for TableReceiptRenderer {
    fn content_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }

    fn extension(&self) -> &'static str {
        "txt"
    }

    fn render_receipt(&self, receipt: &ReceiptDocument) -> Result<Vec<u8>, RenderError> {
        let mut out = String::new();

        writeln!(out, "Receipt {}", receipt.receipt_number)?;
        writeln!(out, "Order #{}", receipt.order_number)?;
        writeln!(
            out,
            "Issued {}",
            receipt.issued_at.strftime("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(out, "Payment: {}", receipt.payment_method.label())?;
        writeln!(out)?;
        writeln!(out, "{}", receipt.customer)?;
        writeln!(out, "{}", receipt.address)?;
        writeln!(out, "{}", receipt.email)?;
        writeln!(out)?;

        let mut builder = Builder::default();

        builder.push_record(["Item", "Qty", "Unit price", "Subtotal"]);

        for line in &receipt.lines {
            let item = if line.artist.is_empty() {
                line.title.clone()
            } else {
                format!("{} - {}", line.title, line.artist)
            };

            builder.push_record([
                item,
                line.quantity.to_string(),
                format!("{:.2}", line.unit_price),
                format!("{:.2}", line.subtotal()),
            ]);
        }

        builder.push_record([
            "Total".to_string(),
            String::new(),
            String::new(),
            format!("{:.2}", receipt.total),
        ]);

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());
        let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(1, separator);
        theme.insert_horizontal_line(receipt.lines.len() + 1, separator);

        table.with(theme);
        table.modify(Columns::new(1..4), Alignment::right());
        table.modify(Rows::first(), Alignment::center());

        writeln!(out, "{table}")?;

        Ok(out.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{documents::ReceiptLine, domain::orders::records::PaymentMethod};

    use super::*;

    fn receipt() -> ReceiptDocument {
        ReceiptDocument {
            receipt_number: "R-7-20251120103005".to_string(),
            issued_at: Timestamp::UNIX_EPOCH,
            payment_method: PaymentMethod::Blik,
            order_number: 7,
            customer: "Jan Kowalski".to_string(),
            address: "ul. Prosta 1".to_string(),
            email: "jan@example.com".to_string(),
            lines: vec![
                ReceiptLine {
                    title: "Kind of Blue".to_string(),
                    artist: "Miles Davis".to_string(),
                    quantity: 1,
                    unit_price: Decimal::new(10_00, 2),
                },
                ReceiptLine {
                    title: "Blue Train".to_string(),
                    artist: "John Coltrane".to_string(),
                    quantity: 2,
                    unit_price: Decimal::new(5_00, 2),
                },
            ],
            total: Decimal::new(20_00, 2),
        }
    }

    #[test]
    fn renders_header_lines_and_total() -> TestResult {
        let bytes = TableReceiptRenderer::new().render_receipt(&receipt())?;
        let text = String::from_utf8(bytes)?;

        assert!(text.contains("Receipt R-7-20251120103005"));
        assert!(text.contains("Payment: BLIK"));
        assert!(text.contains("Kind of Blue - Miles Davis"));
        assert!(text.contains("Blue Train - John Coltrane"));
        assert!(text.contains("10.00"));

        let total_row = text
            .lines()
            .find(|line| line.contains("Total"))
            .unwrap_or_default();

        assert!(total_row.contains("20.00"), "unexpected total row: {total_row}");

        Ok(())
    }

    #[test]
    fn total_row_uses_the_order_total() -> TestResult {
        let mut document = receipt();

        document.total = Decimal::new(99_99, 2);

        let text = String::from_utf8(TableReceiptRenderer::new().render_receipt(&document)?)?;

        assert!(text.contains("99.99"));

        Ok(())
    }
}
