use crate::errors::ValueError;
use crate::parsers::value_parser;
use chrono::{DateTime, FixedOffset};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// Parser family responsible for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Text,
    Number,
    Timestamp,
    Duration,
    Integer,
    UnitInteger,
    Flag,
}

/// A single parsed value, tagged with its type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    Text(String),
    Number(f64),
    Timestamp(Option<DateTime<FixedOffset>>),
    Duration(Duration),
    Integer(i64),
    Flag(bool),
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<Option<DateTime<FixedOffset>>> for Value {
    fn from(v: Option<DateTime<FixedOffset>>) -> Self {
        Value::Timestamp(v)
    }
}

impl From<Duration> for Value {
    fn from(v: Duration) -> Self {
        Value::Duration(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Flag(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Timestamp(Some(ts)) => write!(f, "{}", ts.format(value_parser::TIMESTAMP_FORMAT)),
            Value::Timestamp(None) => f.write_str(value_parser::UNAVAILABLE),
            Value::Duration(d) => write!(f, "{} Seconds", d.as_secs_f64()),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Flag(true) => f.write_str("YES"),
            Value::Flag(false) => f.write_str("NO"),
        }
    }
}

// Maps a field's family token to its parser. AlarmDelay is a Duration with a sentinel.
macro_rules! parse_as {
    (Text, $v:expr) => { value_parser::parse_text($v) };
    (Number, $v:expr) => { value_parser::parse_number($v) };
    (Timestamp, $v:expr) => { value_parser::parse_timestamp($v) };
    (Duration, $v:expr) => { value_parser::parse_duration($v) };
    (AlarmDelay, $v:expr) => { value_parser::parse_alarm_delay($v) };
    (Integer, $v:expr) => { value_parser::parse_integer($v) };
    (UnitInteger, $v:expr) => { value_parser::parse_unit_integer($v) };
    (Flag, $v:expr) => { value_parser::parse_flag($v) };
}

macro_rules! kind_of {
    (AlarmDelay) => { ValueKind::Duration };
    ($kind:ident) => { ValueKind::$kind };
}

// Declares the record, the Field enum and the key registry from one table so
// that every field has exactly one key and one parser.
macro_rules! status_fields {
    ($( $(#[$meta:meta])* $variant:ident => $field:ident : $ty:ty = $key:literal, $kind:ident; )+) => {
        /// Status of a UPS as reported by a network information server.
        ///
        /// Every field starts at its zero value and is only written when the
        /// matching key is seen.
        #[derive(Debug, Clone, Default, PartialEq, Serialize)]
        pub struct Status {
            $( $(#[$meta])* pub $field: $ty, )+
        }

        /// One modelled report key.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Field {
            $( $variant, )+
        }

        impl Field {
            /// All fields, in the order the daemon reports them.
            pub const ALL: &'static [Field] = &[ $( Field::$variant, )+ ];

            /// Key name used on the wire.
            pub fn key(self) -> &'static str {
                match self {
                    $( Field::$variant => $key, )+
                }
            }

            pub fn kind(self) -> ValueKind {
                match self {
                    $( Field::$variant => kind_of!($kind), )+
                }
            }
        }

        impl Status {
            /// Parses `value` for `field` and writes it. On error the field is untouched.
            pub(crate) fn store(&mut self, field: Field, value: &str) -> Result<(), ValueError> {
                match field {
                    $( Field::$variant => self.$field = parse_as!($kind, value)?, )+
                }
                Ok(())
            }

            /// Current value of `field`.
            pub fn get(&self, field: Field) -> Value {
                match field {
                    $( Field::$variant => Value::from(self.$field.clone()), )+
                }
            }
        }
    };
}

status_fields! {
    /// Header record: version, record count and length of the report.
    Apc => apc: String = "APC", Text;
    /// Time the report was generated. `None` if unavailable.
    Date => date: Option<DateTime<FixedOffset>> = "DATE", Timestamp;
    Hostname => hostname: String = "HOSTNAME", Text;
    /// Daemon release, build date and platform.
    Version => version: String = "VERSION", Text;
    UpsName => ups_name: String = "UPSNAME", Text;
    Cable => cable: String = "CABLE", Text;
    Driver => driver: String = "DRIVER", Text;
    UpsMode => ups_mode: String = "UPSMODE", Text;
    /// Time the daemon started.
    StartTime => start_time: Option<DateTime<FixedOffset>> = "STARTTIME", Timestamp;
    Model => model: String = "MODEL", Text;
    /// Space separated status words, e.g. `ONLINE` or `ONBATT LOWBATT`.
    Status => status: String = "STATUS", Text;
    /// Volts.
    LineVoltage => line_voltage: f64 = "LINEV", Number;
    LoadPercent => load_percent: f64 = "LOADPCT", Number;
    BatteryChargePercent => battery_charge_percent: f64 = "BCHARGE", Number;
    /// Estimated runtime left on battery.
    TimeLeft => time_left: Duration = "TIMELEFT", Duration;
    MinimumBatteryChargePercent => minimum_battery_charge_percent: f64 = "MBATTCHG", Number;
    MinimumTimeLeft => minimum_time_left: Duration = "MINTIMEL", Duration;
    MaximumTime => maximum_time: Duration = "MAXTIME", Duration;
    Sense => sense: String = "SENSE", Text;
    LowTransferVoltage => low_transfer_voltage: f64 = "LOTRANS", Number;
    HighTransferVoltage => high_transfer_voltage: f64 = "HITRANS", Number;
    /// Delay before the audible alarm sounds. Zero when reported as `No alarm`.
    AlarmDelay => alarm_delay: Duration = "ALARMDEL", AlarmDelay;
    BatteryVoltage => battery_voltage: f64 = "BATTV", Number;
    /// Reason for the last transfer to battery.
    LastTransfer => last_transfer: String = "LASTXFER", Text;
    NumberTransfers => number_transfers: i64 = "NUMXFERS", Integer;
    /// Time of the last transfer to battery.
    LastOnBattery => last_on_battery: Option<DateTime<FixedOffset>> = "XONBATT", Timestamp;
    TimeOnBattery => time_on_battery: Duration = "TONBATT", Duration;
    CumulativeTimeOnBattery => cumulative_time_on_battery: Duration = "CUMONBATT", Duration;
    /// Time of the last transfer back from battery.
    LastOffBattery => last_off_battery: Option<DateTime<FixedOffset>> = "XOFFBATT", Timestamp;
    LastSelftest => last_selftest: Option<DateTime<FixedOffset>> = "LASTSTEST", Timestamp;
    Selftest => selftest: bool = "SELFTEST", Flag;
    /// Status bits as a hex string, e.g. `0x05000008`.
    StatusFlags => status_flags: String = "STATFLAG", Text;
    SerialNumber => serial_number: String = "SERIALNO", Text;
    BatteryDate => battery_date: String = "BATTDATE", Text;
    NominalInputVoltage => nominal_input_voltage: f64 = "NOMINV", Number;
    NominalBatteryVoltage => nominal_battery_voltage: f64 = "NOMBATTV", Number;
    /// Watts.
    NominalPower => nominal_power: i64 = "NOMPOWER", UnitInteger;
    Firmware => firmware: String = "FIRMWARE", Text;
    /// Trailer record, carries the report time.
    EndApc => end_apc: Option<DateTime<FixedOffset>> = "END APC", Timestamp;
    /// Degrees Celsius.
    InternalTemp => internal_temp: f64 = "ITEMP", Number;
    OutputVoltage => output_voltage: f64 = "OUTPUTV", Number;
    /// Hz.
    LineFrequency => line_frequency: f64 = "LINEFREQ", Number;
    MaximumLineVoltage => maximum_line_voltage: f64 = "MAXLINEV", Number;
    MinimumLineVoltage => minimum_line_voltage: f64 = "MINLINEV", Number;
    WakeDelay => wake_delay: f64 = "DWAKE", Number;
    ShutdownDelay => shutdown_delay: f64 = "DSHUTD", Number;
    LowBatteryDelay => low_battery_delay: f64 = "DLOWBATT", Number;
    RestorePercent => restore_percent: f64 = "RETPCT", Number;
    /// Hours between automatic self tests.
    SelfTestInterval => self_test_interval: i64 = "STESTI", Integer;
    DipSwitches => dip_switches: String = "DIPSW", Text;
    Register1 => register1: String = "REG1", Text;
    Register2 => register2: String = "REG2", Text;
    Register3 => register3: String = "REG3", Text;
    ManufactureDate => manufacture_date: String = "MANDATE", Text;
    NominalOutputVoltage => nominal_output_voltage: f64 = "NOMOUTV", Number;
    ExternalBatteries => external_batteries: i64 = "EXTBATTS", Integer;
    BadBatteries => bad_batteries: i64 = "BADBATTS", Integer;
}

static KEY_REGISTRY: Lazy<HashMap<&'static str, Field>> =
    Lazy::new(|| Field::ALL.iter().map(|f| (f.key(), *f)).collect());

impl Field {
    /// Looks up the field for a trimmed key. Unknown keys return `None`.
    pub fn from_key(key: &str) -> Option<Field> {
        KEY_REGISTRY.get(key).copied()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
