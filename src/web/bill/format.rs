use chrono::NaiveDate;

use crate::{gateway::bill::BillRecord, web::bill::data::FormattedBill};

const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_DATE_FORMAT: &str = "%d.%m.%Y";

/// Turns raw bill records into the display list: most recent first, ties in
/// input order, dates formatted only after sorting on the parsed calendar
/// value. A record whose date does not parse keeps its raw date string and
/// sorts after every parseable record instead of failing the whole list.
pub fn format_bills(bills: Vec<BillRecord>) -> Vec<FormattedBill> {
    let mut keyed: Vec<(Option<NaiveDate>, BillRecord)> = bills
        .into_iter()
        .map(|bill| (parse_date(&bill.date), bill))
        .collect();

    // stable sort, so equal dates keep their fetch order; None is the
    // smallest Option and therefore lands at the end
    keyed.sort_by(|(a, _), (b, _)| b.cmp(a));

    keyed
        .into_iter()
        .map(|(parsed, bill)| format_bill(parsed, bill))
        .collect()
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, WIRE_DATE_FORMAT).ok()
}

fn format_bill(parsed: Option<NaiveDate>, bill: BillRecord) -> FormattedBill {
    let date = match parsed {
        Some(d) => d.format(DISPLAY_DATE_FORMAT).to_string(),
        None => bill.date.clone(),
    };

    FormattedBill {
        id: bill.id,
        date,
        amount: format_amount(bill.amount),
        status_label: bill.status.label().to_string(),
        status_class: bill.status.css_class().to_string(),
        name: bill.name,
        kind: bill.kind,
        receipt_url: bill.receipt_url,
    }
}

fn format_amount(amount: f64) -> String {
    format!("{amount} €")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::bill::BillStatus;

    fn bill(id: &str, date: &str, status: BillStatus) -> BillRecord {
        BillRecord {
            id: id.to_string(),
            date: date.to_string(),
            amount: 100.0,
            status,
            receipt_url: None,
            name: format!("bill {id}"),
            kind: "Transports".to_string(),
        }
    }

    #[test]
    fn orders_most_recent_first() {
        let bills = vec![
            bill("a", "2021-01-01", BillStatus::Pending),
            bill("b", "2022-06-15", BillStatus::Accepted),
            bill("c", "2020-03-10", BillStatus::Refused),
        ];

        let formatted = format_bills(bills);
        let dates: Vec<&str> = formatted.iter().map(|b| b.date.as_str()).collect();
        assert_eq!(dates, vec!["15.06.2022", "01.01.2021", "10.03.2020"]);
    }

    #[test]
    fn output_is_chronologically_descending() {
        let bills = vec![
            bill("a", "2004-04-04", BillStatus::Pending),
            bill("b", "2001-01-01", BillStatus::Refused),
            bill("c", "2003-03-03", BillStatus::Accepted),
            bill("d", "2002-02-02", BillStatus::Pending),
        ];

        let formatted = format_bills(bills);
        let parsed: Vec<NaiveDate> = formatted
            .iter()
            .map(|b| NaiveDate::parse_from_str(&b.date, DISPLAY_DATE_FORMAT).unwrap())
            .collect();
        for pair in parsed.windows(2) {
            assert!(pair[0] >= pair[1], "{} should not come before {}", pair[1], pair[0]);
        }
    }

    #[test]
    fn equal_dates_keep_input_order() {
        let bills = vec![
            bill("first", "2021-05-05", BillStatus::Pending),
            bill("second", "2021-05-05", BillStatus::Pending),
            bill("third", "2021-05-05", BillStatus::Pending),
        ];

        let formatted = format_bills(bills);
        let ids: Vec<&str> = formatted.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn malformed_date_passes_through_raw_and_sorts_last() {
        let bills = vec![
            bill("bad", "not-a-date", BillStatus::Pending),
            bill("ok", "2021-01-01", BillStatus::Pending),
        ];

        let formatted = format_bills(bills);
        assert_eq!(formatted[0].id, "ok");
        assert_eq!(formatted[1].id, "bad");
        assert_eq!(formatted[1].date, "not-a-date");
    }

    #[test]
    fn formatting_is_idempotent() {
        let bills = vec![
            bill("a", "2021-01-01", BillStatus::Pending),
            bill("b", "2022-06-15", BillStatus::Accepted),
        ];

        let once = format_bills(bills.clone());
        let twice = format_bills(bills);
        let once_dates: Vec<&String> = once.iter().map(|b| &b.date).collect();
        let twice_dates: Vec<&String> = twice.iter().map(|b| &b.date).collect();
        assert_eq!(once_dates, twice_dates);
        assert_eq!(
            once.iter().map(|b| &b.id).collect::<Vec<_>>(),
            twice.iter().map(|b| &b.id).collect::<Vec<_>>()
        );
    }

    #[test]
    fn maps_status_to_label_and_class() {
        let formatted = format_bills(vec![
            bill("a", "2021-01-01", BillStatus::Pending),
            bill("b", "2021-01-02", BillStatus::Accepted),
            bill("c", "2021-01-03", BillStatus::Refused),
        ]);

        // descending: refused, accepted, pending
        assert_eq!(formatted[0].status_label, "Refusé");
        assert_eq!(formatted[0].status_class, "status-refused");
        assert_eq!(formatted[1].status_label, "Accepté");
        assert_eq!(formatted[2].status_label, "En attente");
    }

    #[test]
    fn renders_amount_with_currency() {
        let formatted = format_bills(vec![bill("a", "2021-01-01", BillStatus::Pending)]);
        assert_eq!(formatted[0].amount, "100 €");
    }
}
