//! Table rendering for command output.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use drg_extract::{Extraction, ExtractionFeedback};
use drg_model::{DrgRule, PatientRecord, RecordStatus, User};
use drg_report::{ReportSummary, SeriesPoint};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn status_cell(status: RecordStatus) -> Cell {
    let color = match status {
        RecordStatus::Compliant => Color::Green,
        RecordStatus::Flagged => Color::Red,
    };
    Cell::new(status).fg(color).add_attribute(Attribute::Bold)
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}

pub fn print_rules(rules: &[DrgRule]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("DRG"),
        header_cell("Disease"),
        header_cell("Max cost"),
        header_cell("Required metrics"),
        header_cell("Active"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Center);
    for rule in rules {
        let metrics = rule
            .required_metrics
            .iter()
            .map(|m| format!("{} [{}] {}-{} {}", m.label, m.key, m.min, m.max, m.unit))
            .collect::<Vec<_>>()
            .join("\n");
        let active = if rule.is_active {
            Cell::new("yes").fg(Color::Green)
        } else {
            dim_cell("no")
        };
        table.add_row(vec![
            Cell::new(&rule.id),
            Cell::new(&rule.drg_code).fg(Color::Blue).add_attribute(Attribute::Bold),
            Cell::new(&rule.disease_name),
            Cell::new(money(rule.max_cost)),
            Cell::new(metrics),
            active,
        ]);
    }
    println!("{table}");
}

pub fn print_users(users: &[User]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Username"),
        header_cell("Role"),
        header_cell("Clinic"),
    ]);
    apply_table_style(&mut table);
    for user in users {
        table.add_row(vec![
            dim_cell(&user.id),
            Cell::new(&user.username),
            Cell::new(user.role.label()),
            Cell::new(&user.clinic_name),
        ]);
    }
    println!("{table}");
}

pub fn print_records(records: &[PatientRecord]) {
    if records.is_empty() {
        println!("No records.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Date"),
        header_cell("Patient"),
        header_cell("Disease"),
        header_cell("Doctor"),
        header_cell("Clinic"),
        header_cell("Cost"),
        header_cell("Status"),
        header_cell("Messages"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 5, CellAlignment::Right);
    for record in records {
        table.add_row(vec![
            Cell::new(record.record_date.format("%Y-%m-%d")),
            Cell::new(&record.patient_name),
            Cell::new(&record.disease_name),
            Cell::new(&record.doctor_name),
            Cell::new(&record.clinic_name),
            Cell::new(money(record.total_cost)),
            status_cell(record.status),
            dim_cell(record.validation_messages.join("\n")),
        ]);
    }
    println!("{table}");
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() { placeholder } else { value }
}

fn record_fields_table(record: &PatientRecord) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    let rows = [
        ("Record", record.id.clone()),
        ("Visit date", record.record_date.format("%Y-%m-%d").to_string()),
        ("Doctor", format!("{} ({})", record.doctor_name, record.clinic_name)),
        ("Patient", record.patient_name.clone()),
        ("Patient ID", record.patient_id.clone()),
        ("Gender", record.gender.clone()),
        ("Age", record.age.to_string()),
        ("Ethnicity", or_placeholder(&record.ethnicity, "not given").to_string()),
        ("Contact", or_placeholder(&record.contact_number, "-").to_string()),
        ("Allergies", or_placeholder(&record.allergy_history, "none").to_string()),
        ("Medical history", or_placeholder(&record.past_medical_history, "none").to_string()),
        ("Disease", format!("{} (rule {})", record.disease_name, record.disease_id)),
        ("Total cost", money(record.total_cost)),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label).add_attribute(Attribute::Bold), Cell::new(value)]);
    }
    table.add_row(vec![
        Cell::new("Status").add_attribute(Attribute::Bold),
        status_cell(record.status),
    ]);
    table
}

/// Stored metric values next to the current rule's ranges. Values for keys
/// the rule no longer lists are shown without a range.
fn record_metrics_table(record: &PatientRecord, rule: Option<&DrgRule>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Metric"),
        header_cell("Value"),
        header_cell("Range"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    let required = rule.map_or(&[][..], |rule| rule.required_metrics.as_slice());
    for metric in required {
        let value = match record.metrics.get(&metric.key) {
            Some(value) if metric.contains(*value) => {
                Cell::new(format!("{value} {}", metric.unit)).fg(Color::Green)
            }
            Some(value) => Cell::new(format!("{value} {}", metric.unit)).fg(Color::Red),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(&metric.label),
            value,
            dim_cell(format!("{}-{} {}", metric.min, metric.max, metric.unit)),
        ]);
    }
    for (key, value) in &record.metrics {
        if required.iter().any(|metric| &metric.key == key) {
            continue;
        }
        table.add_row(vec![Cell::new(key), Cell::new(value), dim_cell("-")]);
    }
    if let Some(rule) = rule {
        let cost = Cell::new(money(record.total_cost));
        let cost = if rule.within_cost_cap(record.total_cost) {
            cost.fg(Color::Green)
        } else {
            cost.fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new("Total cost"),
            cost,
            dim_cell(format!("<= {}", money(rule.max_cost))),
        ]);
    }
    table
}

/// Print one record in full.
pub fn print_record_detail(record: &PatientRecord, rule: Option<&DrgRule>) {
    println!("{}", record_fields_table(record));
    println!("{}", record_metrics_table(record, rule));
    if rule.is_none() {
        println!("Rule {} no longer exists; ranges are unavailable.", record.disease_id);
    }
    for message in &record.validation_messages {
        println!("- {message}");
    }
}

/// Print a stored record confirmation.
pub fn print_stored(record: &PatientRecord) {
    println!(
        "Record {} stored as {} ({} for {}).",
        record.id,
        record.status,
        money(record.total_cost),
        record.disease_name
    );
}

/// Print the reasons a submission was rejected.
pub fn print_rejection(messages: &[String]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Problem")]);
    apply_table_style(&mut table);
    for (index, message) in messages.iter().enumerate() {
        table.add_row(vec![
            dim_cell(index + 1),
            Cell::new(message).fg(Color::Red),
        ]);
    }
    eprintln!("Submission rejected; nothing was stored.");
    eprintln!("{table}");
}

pub fn print_extraction(rule: &DrgRule, extraction: &Extraction, feedback: &ExtractionFeedback) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Value"),
        header_cell("Range"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for metric in &rule.required_metrics {
        let value = match extraction.metrics.get(&metric.key) {
            Some(value) if metric.contains(*value) => Cell::new(value).fg(Color::Green),
            Some(value) => Cell::new(value).fg(Color::Red),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(&metric.label),
            value,
            dim_cell(format!("{}-{} {}", metric.min, metric.max, metric.unit)),
        ]);
    }
    let cost = match extraction.cost {
        Some(cost) if feedback.cost_exceeded => Cell::new(money(cost)).fg(Color::Red),
        Some(cost) => Cell::new(money(cost)).fg(Color::Green),
        None => dim_cell("-"),
    };
    table.add_row(vec![
        Cell::new("Total cost"),
        cost,
        dim_cell(format!("<= {}", money(rule.max_cost))),
    ]);
    println!("{table}");
    println!("{}", feedback.message);
}

fn series_table(title: &str, points: &[SeriesPoint]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell(title), header_cell("Submissions")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for point in points {
        table.add_row(vec![Cell::new(&point.label), Cell::new(point.value)]);
    }
    table
}

pub fn print_report(summary: &ReportSummary, by_doctor: &[SeriesPoint]) {
    println!(
        "Records: {}  Compliant: {}  Flagged: {}  Compliance rate: {}%",
        summary.total_records,
        summary.compliant_records,
        summary.flagged_records,
        summary.compliance_rate
    );

    let mut doctors = Table::new();
    doctors.set_header(vec![
        header_cell("Doctor"),
        header_cell("Clinic"),
        header_cell("Records"),
        header_cell("Total cost"),
        header_cell("Average cost"),
    ]);
    apply_summary_table_style(&mut doctors);
    for index in 2..5 {
        align_column(&mut doctors, index, CellAlignment::Right);
    }
    for stats in &summary.doctors {
        doctors.add_row(vec![
            Cell::new(&stats.doctor_name).add_attribute(Attribute::Bold),
            Cell::new(&stats.clinic_name),
            Cell::new(stats.count),
            Cell::new(money(stats.total_cost)),
            Cell::new(money(stats.average_cost)),
        ]);
    }
    println!("{doctors}");

    let mut clinics = Table::new();
    clinics.set_header(vec![
        header_cell("Clinic"),
        header_cell("Records"),
        header_cell("Doctors"),
        header_cell("Total cost"),
        header_cell("Average cost"),
    ]);
    apply_summary_table_style(&mut clinics);
    for index in 1..5 {
        align_column(&mut clinics, index, CellAlignment::Right);
    }
    for stats in &summary.clinics {
        clinics.add_row(vec![
            Cell::new(&stats.clinic_name).add_attribute(Attribute::Bold),
            Cell::new(stats.count),
            Cell::new(stats.doctor_count),
            Cell::new(money(stats.total_cost)),
            Cell::new(money(stats.average_cost)),
        ]);
    }
    println!("{clinics}");

    println!("{}", series_table("Doctor", by_doctor));
}
