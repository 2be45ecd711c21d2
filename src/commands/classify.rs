use crate::formatting::OutputFormatter;
use crate::severity::{classify, clamp_percentage, SeverityBucket};
use anyhow::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
pub struct Classification {
    pub percentage: f64,
    pub clamped: f64,
    pub bucket: &'static SeverityBucket,
}

pub fn classify_all(percentages: &[f64]) -> Vec<Classification> {
    percentages
        .iter()
        .map(|&percentage| Classification {
            percentage,
            clamped: clamp_percentage(percentage),
            bucket: classify(percentage),
        })
        .collect()
}

pub fn write_classifications<W: Write>(
    writer: &mut W,
    classifications: &[Classification],
    formatter: &dyn OutputFormatter,
    json: bool,
) -> Result<()> {
    if json {
        // NaN has no JSON representation and serializes as null
        serde_json::to_writer_pretty(&mut *writer, classifications)?;
        writeln!(writer)?;
        return Ok(());
    }

    for item in classifications {
        let sample = formatter.severity(&format!(" {:>6.2}% ", item.clamped), item.bucket);
        writeln!(
            writer,
            "{} bucket {:>2}  fg {}  bg {}",
            sample,
            item.bucket.index,
            item.bucket.foreground.hex(),
            item.bucket.background.hex()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatting::PlainFormatter;

    #[test]
    fn test_classify_all_clamps_and_buckets() {
        let results = classify_all(&[-3.0, 4.9, 55.0, 100.0]);
        let buckets: Vec<usize> = results.iter().map(|c| c.bucket.index).collect();
        assert_eq!(buckets, vec![0, 0, 9, 10]);
        assert_eq!(results[0].clamped, 0.0);
    }

    #[test]
    fn test_text_output() {
        let mut out = Vec::new();
        write_classifications(&mut out, &classify_all(&[100.0]), &PlainFormatter, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, " 100.00%  bucket 10  fg #ffffff  bg #1a9850\n");
    }

    #[test]
    fn test_json_output() {
        let mut out = Vec::new();
        write_classifications(&mut out, &classify_all(&[5.0]), &PlainFormatter, true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["bucket"]["index"], 1);
        assert_eq!(value[0]["bucket"]["background"]["r"], 0xb2);
    }
}
