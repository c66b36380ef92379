use std::io::{self, Write};

use crate::data::model::{Measures, Record, POPULATION_KEY};

/// Printed in place of a value the record does not have.
pub const NOT_AVAILABLE: &str = "'N/A'";

const HEADING: &str = "        ";
const AGE_ITEM: &str = "               ";
const ITEM: &str = "                ";

const AGE_ROWS: [(&str, &str); 3] = [("< 5", "< 5"), ("< 18", "< 18"), ("> 65", "> 65")];

const EDUCATION_ROWS: [(&str, &str); 2] = [
    (">= High School", "High School or Higher"),
    (">= Bachelor's", "Bachelor's Degree or Higher"),
];

const ETHNICITY_ROWS: [(&str, &str); 8] = [
    (
        "American Indian and Alaska Native",
        "American Indian and Alaska Native Alone",
    ),
    ("Asian Alone", "Asian Alone"),
    ("Black Alone", "Black Alone"),
    ("Hispanic or Latino", "Hispanic or Latino"),
    (
        "Native Hawaiian and Other Pacific Islander Alone",
        "Native Hawaiian and Other Pacific Islander Alone",
    ),
    ("Two or More Races", "Two or More Races"),
    ("White Alone", "White Alone"),
    (
        "White Alone, not Hispanic or Latino",
        "White Alone, not Hispanic or Latino",
    ),
];

/// (label, key, suffix)
const INCOME_ROWS: [(&str, &str, &str); 3] = [
    ("Median Household", "Median Household Income", ""),
    ("Per Capita", "Per Capita Income", ""),
    ("Below Poverty Level", "Persons Below Poverty Level", "%"),
];

/// Value text for `key`, or [`NOT_AVAILABLE`].
fn value(measures: &Measures, key: &str) -> String {
    measures
        .get(key)
        .map_or_else(|| NOT_AVAILABLE.to_owned(), ToString::to_string)
}

/// Write the fixed-layout block for one county, followed by an empty line.
pub fn write_record(out: &mut impl Write, record: &Record) -> io::Result<()> {
    writeln!(out, "{}, {}", record.county, record.state)?;
    writeln!(
        out,
        "{HEADING}Population: {}",
        value(&record.population, POPULATION_KEY)
    )?;

    writeln!(out, "{HEADING}Age:")?;
    for (label, key) in AGE_ROWS {
        writeln!(out, "{AGE_ITEM}{label}: {}%", value(&record.age, key))?;
    }

    writeln!(out, "{HEADING}Education")?;
    for (label, key) in EDUCATION_ROWS {
        writeln!(out, "{ITEM}{label}: {}%", value(&record.education, key))?;
    }

    writeln!(out, "{HEADING}Ethnicity Percentages")?;
    for (label, key) in ETHNICITY_ROWS {
        writeln!(out, "{ITEM}{label}: {}%", value(&record.ethnicities, key))?;
    }

    writeln!(out, "{HEADING}Income")?;
    for (label, key, suffix) in INCOME_ROWS {
        writeln!(out, "{ITEM}{label}: {}{suffix}", value(&record.income, key))?;
    }

    writeln!(out)
}

/// Write [`write_record`] blocks for every record, in order.
pub fn write_records<'a>(
    out: &mut impl Write,
    records: impl IntoIterator<Item = &'a Record>,
) -> io::Result<()> {
    for record in records {
        write_record(out, record)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Number;

    fn render(record: &Record) -> String {
        let mut buf = Vec::new();
        write_record(&mut buf, record).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn empty_record_prints_markers_and_suffixes() {
        let text = render(&Record::new("Nowhere County", "ZZ"));
        let expected = "\
Nowhere County, ZZ
        Population: 'N/A'
        Age:
               < 5: 'N/A'%
               < 18: 'N/A'%
               > 65: 'N/A'%
        Education
                >= High School: 'N/A'%
                >= Bachelor's: 'N/A'%
        Ethnicity Percentages
                American Indian and Alaska Native: 'N/A'%
                Asian Alone: 'N/A'%
                Black Alone: 'N/A'%
                Hispanic or Latino: 'N/A'%
                Native Hawaiian and Other Pacific Islander Alone: 'N/A'%
                Two or More Races: 'N/A'%
                White Alone: 'N/A'%
                White Alone, not Hispanic or Latino: 'N/A'%
        Income
                Median Household: 'N/A'
                Per Capita: 'N/A'
                Below Poverty Level: 'N/A'%

";
        assert_eq!(text, expected);
    }

    #[test]
    fn values_keep_their_kind() {
        let mut record = Record::new("Autauga County", "AL");
        record
            .population
            .insert(POPULATION_KEY.to_owned(), Number::Int(55395));
        record.age.insert("< 5".to_owned(), Number::Float(6.0));
        record
            .income
            .insert("Median Household Income".to_owned(), Number::Int(54366));
        record
            .income
            .insert("Persons Below Poverty Level".to_owned(), Number::Float(12.1));

        let text = render(&record);
        assert!(text.contains("        Population: 55395\n"));
        assert!(text.contains("               < 5: 6.0%\n"));
        assert!(text.contains("                Median Household: 54366\n"));
        assert!(text.contains("                Below Poverty Level: 12.1%\n"));
    }

    #[test]
    fn records_are_separated_by_blank_lines() {
        let records = [Record::new("A", "AL"), Record::new("B", "WY")];
        let mut buf = Vec::new();
        write_records(&mut buf, &records).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 2 * 23);
        assert!(text.contains("'N/A'%\n\nB, WY\n"));
    }
}
