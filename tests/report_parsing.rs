use chrono::{FixedOffset, TimeZone};
use nis_status::{
    parse_line, parse_report, parse_report_with, ErrorPolicy, Field, ReportOptions, Status,
    StatusError, Value, ValueKind,
};
use std::time::Duration;

const SAMPLE_REPORT: &str = "\
APC      : 001,051,1245
DATE     : 2023-01-15 08:30:00 -0500
HOSTNAME : nas01
VERSION  : 3.14.14 (31 May 2016) debian
UPSNAME  : rack-ups
CABLE    : USB Cable
DRIVER   : USB UPS Driver
UPSMODE  : Stand Alone
STARTTIME: 2023-01-10 19:02:11 -0500
MODEL    : Back-UPS RS 1500G
STATUS   : ONLINE
LINEV    : 121.0 Volts
LOADPCT  : 18.0 Percent
BCHARGE  : 100.0 Percent
TIMELEFT : 51.3 Minutes
MBATTCHG : 5 Percent
MINTIMEL : 3 Minutes
MAXTIME  : 0 Seconds
SENSE    : Medium
LOTRANS  : 88.0 Volts
HITRANS  : 139.0 Volts
ALARMDEL : No alarm
BATTV    : 27.1 Volts
LASTXFER : Unacceptable line voltage changes
NUMXFERS : 2
XONBATT  : 2023-01-14 22:15:03 -0500
TONBATT  : 0 Seconds
CUMONBATT: 43 Seconds
XOFFBATT : 2023-01-14 22:15:25 -0500
LASTSTEST: N/A
SELFTEST : NO
STESTI   : 336
STATFLAG : 0x05000008
SERIALNO : 3B1234X56789
BATTDATE : 2021-03-02
NOMINV   : 120 Volts
NOMBATTV : 24.0 Volts
NOMPOWER : 865 Watts
FIRMWARE : 865.L6 .D USB FW:L6
EXTBATTS : 0
BADBATTS : 0
MANDATE  : 2020-11-09
ITEMP    : 29.2 C
OUTPUTV  : 121.0 Volts
LINEFREQ : 60.0 Hz
MAXLINEV : 122.4 Volts
MINLINEV : 119.6 Volts
DWAKE    : 0 Seconds
DSHUTD   : 90 Seconds
DLOWBATT : 2 Minutes
RETPCT   : 15.0 Percent
DIPSW    : 0x00
REG1     : 0x00
REG2     : 0x00
REG3     : 0x00
NOMOUTV  : 120 Volts
ALARMMOD : Always
END APC  : 2023-01-15 08:30:01 -0500
";

fn est(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> chrono::DateTime<FixedOffset> {
    FixedOffset::west_opt(5 * 3600)
        .unwrap()
        .with_ymd_and_hms(y, m, d, h, min, s)
        .unwrap()
}

#[test]
fn test_full_report() {
    let _ = env_logger::builder().is_test(true).try_init();
    let status = parse_report(SAMPLE_REPORT.lines()).unwrap();

    assert_eq!(status.apc, "001,051,1245");
    assert_eq!(status.date, Some(est(2023, 1, 15, 8, 30, 0)));
    assert_eq!(status.hostname, "nas01");
    assert_eq!(status.version, "3.14.14 (31 May 2016) debian");
    assert_eq!(status.ups_name, "rack-ups");
    assert_eq!(status.cable, "USB Cable");
    assert_eq!(status.driver, "USB UPS Driver");
    assert_eq!(status.ups_mode, "Stand Alone");
    assert_eq!(status.start_time, Some(est(2023, 1, 10, 19, 2, 11)));
    assert_eq!(status.model, "Back-UPS RS 1500G");
    assert_eq!(status.status, "ONLINE");
    assert_eq!(status.line_voltage, 121.0);
    assert_eq!(status.load_percent, 18.0);
    assert_eq!(status.battery_charge_percent, 100.0);
    assert_eq!(status.time_left, Duration::from_secs(51 * 60 + 18));
    assert_eq!(status.minimum_battery_charge_percent, 5.0);
    assert_eq!(status.minimum_time_left, Duration::from_secs(180));
    assert_eq!(status.maximum_time, Duration::ZERO);
    assert_eq!(status.sense, "Medium");
    assert_eq!(status.low_transfer_voltage, 88.0);
    assert_eq!(status.high_transfer_voltage, 139.0);
    assert_eq!(status.alarm_delay, Duration::ZERO);
    assert_eq!(status.battery_voltage, 27.1);
    assert_eq!(status.last_transfer, "Unacceptable line voltage changes");
    assert_eq!(status.number_transfers, 2);
    assert_eq!(status.last_on_battery, Some(est(2023, 1, 14, 22, 15, 3)));
    assert_eq!(status.time_on_battery, Duration::ZERO);
    assert_eq!(status.cumulative_time_on_battery, Duration::from_secs(43));
    assert_eq!(status.last_off_battery, Some(est(2023, 1, 14, 22, 15, 25)));
    assert_eq!(status.last_selftest, None);
    assert!(!status.selftest);
    assert_eq!(status.self_test_interval, 336);
    assert_eq!(status.status_flags, "0x05000008");
    assert_eq!(status.serial_number, "3B1234X56789");
    assert_eq!(status.battery_date, "2021-03-02");
    assert_eq!(status.nominal_input_voltage, 120.0);
    assert_eq!(status.nominal_battery_voltage, 24.0);
    assert_eq!(status.nominal_power, 865);
    assert_eq!(status.firmware, "865.L6 .D USB FW:L6");
    assert_eq!(status.external_batteries, 0);
    assert_eq!(status.bad_batteries, 0);
    assert_eq!(status.manufacture_date, "2020-11-09");
    assert_eq!(status.internal_temp, 29.2);
    assert_eq!(status.output_voltage, 121.0);
    assert_eq!(status.line_frequency, 60.0);
    assert_eq!(status.maximum_line_voltage, 122.4);
    assert_eq!(status.minimum_line_voltage, 119.6);
    assert_eq!(status.wake_delay, 0.0);
    assert_eq!(status.shutdown_delay, 90.0);
    assert_eq!(status.low_battery_delay, 2.0);
    assert_eq!(status.restore_percent, 15.0);
    assert_eq!(status.dip_switches, "0x00");
    assert_eq!(status.register1, "0x00");
    assert_eq!(status.register2, "0x00");
    assert_eq!(status.register3, "0x00");
    assert_eq!(status.nominal_output_voltage, 120.0);
    assert_eq!(status.end_apc, Some(est(2023, 1, 15, 8, 30, 1)));
}

#[test]
fn test_report_stats() {
    let options = ReportOptions::default();
    let (_, stats) = parse_report_with(SAMPLE_REPORT.lines(), &options).unwrap();
    assert_eq!(stats.lines_read, 58);
    assert_eq!(stats.fields_set, 57);
    assert_eq!(stats.unknown_keys, 1);
    assert_eq!(stats.total_skipped(), 0);
}

// A valid sample value for each parser family.
fn sample_value(field: Field) -> &'static str {
    match field {
        Field::AlarmDelay => "No alarm",
        Field::NominalPower => "865 Watts",
        _ => match field.kind() {
            ValueKind::Text => "some text",
            ValueKind::Number => "12.5 Units",
            ValueKind::Timestamp => "2023-01-15 08:30:00 -0500",
            ValueKind::Duration => "2 Minutes",
            ValueKind::Integer | ValueKind::UnitInteger => "7",
            ValueKind::Flag => "YES",
        },
    }
}

#[test]
fn test_every_key_writes_exactly_its_field() {
    let baseline = Status::default();

    for field in Field::ALL {
        let mut status = Status::default();
        let line = format!("{} : {}", field.key(), sample_value(*field));
        parse_line(&mut status, &line).unwrap();

        for other in Field::ALL {
            if other != field {
                assert_eq!(
                    status.get(*other),
                    baseline.get(*other),
                    "{} also changed {}",
                    field,
                    other
                );
            }
        }

        let written = status.get(*field);
        match field {
            Field::AlarmDelay => assert_eq!(written, Value::Duration(Duration::ZERO)),
            _ => assert_ne!(written, baseline.get(*field), "{} was not written", field),
        }
    }
}

#[test]
fn test_skip_policy_keeps_earlier_fields() {
    let report = "STATUS : ONBATT\nLINEV : ???\nNOTALINE\nBCHARGE : 55.0 Percent\n";
    let options = ReportOptions {
        on_malformed_line: ErrorPolicy::Skip,
        on_field_error: ErrorPolicy::Skip,
    };
    let (status, stats) = parse_report_with(report.lines(), &options).unwrap();
    assert_eq!(status.status, "ONBATT");
    assert_eq!(status.line_voltage, 0.0);
    assert_eq!(status.battery_charge_percent, 55.0);
    assert_eq!(stats.total_skipped(), 2);

    assert!(matches!(
        parse_report(report.lines()),
        Err(StatusError::FieldParse { .. })
    ));
}

#[test]
fn test_status_serializes_to_json() {
    let status = parse_report(SAMPLE_REPORT.lines()).unwrap();
    let json = serde_json::to_value(&status).unwrap();
    assert_eq!(json["hostname"], "nas01");
    assert_eq!(json["nominal_power"], 865);
    assert_eq!(json["last_selftest"], serde_json::Value::Null);
}
