use crate::domain::statement::FamilyStatement;
use crate::error::Result;
use std::io::Write;

const HEADER: [&str; 5] = ["family", "name", "total_due", "total_paid", "balance"];

/// Writes family statements as CSV.
///
/// The header is always written, even when there are no statements. Amounts
/// are written without trailing zeros.
pub struct StatementWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> StatementWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(sink);
        Self { writer }
    }

    pub fn write_statements<I>(&mut self, statements: I) -> Result<()>
    where
        I: IntoIterator<Item = FamilyStatement>,
    {
        self.writer.write_record(HEADER)?;
        for statement in statements {
            self.writer.write_record([
                statement.family_id.to_string(),
                statement.family_name.unwrap_or_default(),
                statement.total_due.to_string(),
                statement.total_paid.to_string(),
                statement.balance.to_string(),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Money;
    use rust_decimal_macros::dec;

    #[test]
    fn test_writer_output() {
        let mut buffer = Vec::new();
        {
            let mut writer = StatementWriter::new(&mut buffer);
            writer
                .write_statements(vec![
                    FamilyStatement::new(
                        1,
                        Some("Dupont, Marie".to_string()),
                        Money::new(dec!(960.00)),
                        Money::new(dec!(575)),
                    ),
                    FamilyStatement::new(2, None, Money::new(dec!(100)), Money::new(dec!(150.50))),
                ])
                .unwrap();
        }

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(
            output,
            "family,name,total_due,total_paid,balance\n\
             1,\"Dupont, Marie\",960,575,385\n\
             2,,100,150.5,-50.5\n"
        );
    }

    #[test]
    fn test_writer_header_only() {
        let mut buffer = Vec::new();
        StatementWriter::new(&mut buffer)
            .write_statements(Vec::new())
            .unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "family,name,total_due,total_paid,balance\n"
        );
    }
}
