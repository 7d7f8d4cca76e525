//! Vertical card display for verification results and decoded identity numbers.

use ktpscan_core::{Clock, ExtractedRecord, IdentityNumber};

use crate::verify::Verification;

/// Print a verification as a vertical card grouped by section.
pub fn print_verification(v: &Verification) {
    let title = v
        .record
        .as_ref()
        .map(|r| r.identity_number.as_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("(no identity number)");
    println!("=== {title} ===");
    println!();

    println!("Verdict");
    print_row("status", v.status.as_str());
    print_row("valid", yes_no(v.valid));
    print_row("confidence", &format!("{:.2}", v.confidence));
    print_row("would persist", yes_no(v.would_persist()));
    if let Some(summary) = &v.summary {
        print_row("defects", &summary.error_count.to_string());
        print_row("severity", summary.severity.as_str());
    }
    println!();

    if let Some(record) = &v.record {
        print_record(record);
    }

    if !v.defects.is_empty() {
        println!("Defects");
        for defect in &v.defects {
            print_row(defect.code.as_str(), &defect.message);
        }
        println!();
    }

    let extractor_errors = v.validation_errors.len().saturating_sub(v.defects.len());
    if extractor_errors > 0 {
        println!("Extractor Errors");
        for err in &v.validation_errors[..extractor_errors] {
            println!("  {err}");
        }
        println!();
    }

    if !v.notes.is_empty() {
        println!("Notes");
        for note in &v.notes {
            println!("  {note}");
        }
        println!();
    }
}

fn print_record(r: &ExtractedRecord) {
    println!("Identity");
    print_row("nik", &r.identity_number);
    print_row("name", &r.name);
    print_opt("birth place", r.birth_place.as_deref());
    print_opt("birth date", r.birth_date.as_deref());
    print_opt("sex", r.sex.as_ref().map(|s| s.as_str()));
    print_opt("religion", r.religion.as_ref().map(|s| s.as_str()));
    print_opt("marital status", r.marital_status.as_ref().map(|s| s.as_str()));
    print_opt("occupation", r.occupation.as_deref());
    print_opt("nationality", r.nationality.as_deref());
    print_opt("valid until", r.valid_until.as_deref());
    println!();

    let address = [
        r.address.as_deref(),
        r.rt_rw.as_deref(),
        r.village.as_deref(),
        r.district.as_deref(),
        r.regency.as_deref(),
        r.province.as_ref().map(|p| p.as_str()),
    ];
    if address.iter().any(Option::is_some) {
        println!("Address");
        print_opt("street", r.address.as_deref());
        print_opt("rt/rw", r.rt_rw.as_deref());
        print_opt("village", r.village.as_deref());
        print_opt("district", r.district.as_deref());
        print_opt("regency/city", r.regency.as_deref());
        print_opt("province", r.province.as_ref().map(|p| p.as_str()));
        println!();
    }
}

/// Print the segments of a decoded identity number.
pub fn print_identity_number(nik: &IdentityNumber, clock: &dyn Clock) {
    println!("=== {nik} ===");
    println!();

    println!("Region");
    for (level, code) in nik.regions() {
        print_row(level.as_str(), &format!("{code:02}"));
    }
    println!();

    let birth = nik.birth;
    let current_year = clock.current_year();
    println!("Birth");
    print_row("encoded day", &format!("{:02}", birth.raw_day));
    print_row("sex", nik.embedded_sex().as_str());
    match birth.to_date(current_year) {
        Some(date) => print_row("date", &date.format("%d-%m-%Y").to_string()),
        None => print_row(
            "date",
            &format!(
                "invalid ({:02}-{:02}-{})",
                birth.day(),
                birth.month,
                birth.full_year(current_year)
            ),
        ),
    }
    println!();

    println!("Registration");
    print_row("sequence", &format!("{:04}", nik.sequence));
    println!();
}

// ── Row helpers ──

fn print_row(label: &str, value: &str) {
    println!("  {label:<26} {value}");
}

fn print_opt(label: &str, value: Option<&str>) {
    if let Some(v) = value.filter(|v| !v.is_empty()) {
        print_row(label, v);
    }
}

fn yes_no(b: bool) -> &'static str {
    if b { "yes" } else { "no" }
}
