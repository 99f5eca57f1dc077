use cron_fields::{CronParser, FieldKind, FieldSet, FieldValue, Fields, Options, Result, ScheduleHorizon};

#[test]
fn every_quarter_of_hour() -> Result<()> {
    let parser = CronParser::new("*/15 * * * *")?;

    assert_eq!(parser.fields().minute(), [0, 15, 30, 45]);
    assert_eq!(parser.fields().hour(), (0..=23).collect::<Vec<FieldValue>>());

    Ok(())
}

#[test]
fn question_mark_takes_today() -> Result<()> {
    let fields = Fields::parse("0 0 * * ?", &ScheduleHorizon::default())?;

    assert_eq!(fields.minute(), [0]);
    assert_eq!(fields.hour(), [0]);
    assert_eq!(fields.month(), (1..=12).collect::<Vec<FieldValue>>());
    assert!(fields.is_wildcard(FieldKind::Dom));
    assert!(fields.is_wildcard(FieldKind::Month));

    let dow = fields.dow().values().unwrap();
    assert_eq!(dow.len(), 1);
    assert!(dow[0] <= 6);

    Ok(())
}

#[test]
fn last_day_of_month_is_passed_through() -> Result<()> {
    let parser = CronParser::new("0 0 L * ?")?;
    assert_eq!(parser.fields().dom(), &FieldSet::Raw("L".to_owned()));

    Ok(())
}

#[test]
fn past_end_date_is_replaced_with_default() {
    let options = Options::default().with_end_date("31 Dec 1900");
    let horizon = ScheduleHorizon::new(&options);

    assert_eq!(horizon.end_date().to_string(), "2099-12-31 23:59:59");
}

#[test]
fn numeric_fields_are_sorted_and_unique() -> Result<()> {
    let parser = CronParser::new("30,5,5-10,*/20 23,1,1 1,31,15 dec,1,JAN sat,7,0,SUN")?;
    let fields = parser.fields();

    assert_eq!(fields.minute(), [0, 5, 6, 7, 8, 9, 10, 20, 30, 40]);
    assert_eq!(fields.hour(), [1, 23]);
    assert_eq!(fields.dom().values(), Some([1, 15, 31].as_slice()));
    assert_eq!(fields.month(), [1, 12]);
    assert_eq!(fields.dow().values(), Some([0, 6].as_slice()));

    Ok(())
}
