//! Line-oriented parsing of hostapd control interface responses.
//!
//! Every response line is classified into a [`Line`] first. The `status`
//! parser only consumes key-value lines; the `all_sta` parser additionally
//! uses MAC heading lines as the sole block delimiter.

use std::collections::HashMap;

use super::MacAddress;

/// Classification of a single response line.
#[derive(Debug, PartialEq, Eq)]
pub enum Line<'a> {
    /// A line consisting solely of a canonical MAC address.
    MacHeading(MacAddress),
    /// A `key=value` line. The value is everything after the first `=`.
    KeyValue(&'a str, &'a str),
    /// Anything else, e.g. blank lines or `Selected interface 'wlan0'`.
    Ignored,
}

impl<'a> Line<'a> {
    /// Classifies a single line, without its terminator.
    ///
    /// A MAC address only counts as a heading when nothing else is on the
    /// line, so `addr=aa:bb:cc:dd:ee:ff` stays a key-value line.
    pub fn classify(line: &'a str) -> Self {
        if let Ok(mac) = line.trim().parse::<MacAddress>() {
            return Line::MacHeading(mac);
        }

        match line.split_once('=') {
            Some((key, value)) if !key.is_empty() => Line::KeyValue(key, value),
            _ => Line::Ignored,
        }
    }
}

/// Parses a flat `key=value` block into a map.
///
/// Lines that are not key-value lines are skipped. If a key repeats, the last
/// occurrence wins.
///
/// # Examples
///
/// ```
/// # use hostapd_exporter::status::parse_key_values;
/// let fields = parse_key_values("state=ENABLED\nchannel=6\ngarbage\n");
/// assert_eq!(fields.get("channel"), Some(&"6"));
/// assert_eq!(fields.len(), 2);
/// ```
pub fn parse_key_values(text: &str) -> HashMap<&str, &str> {
    text.lines()
        .filter_map(|line| match Line::classify(line) {
            Line::KeyValue(key, value) => Some((key, value)),
            _ => None,
        })
        .collect()
}

#[derive(Debug)]
enum State<'a> {
    SeekingHeading,
    InBlock {
        mac: MacAddress,
        fields: HashMap<&'a str, &'a str>,
    },
}

/// Splits an `all_sta` response into per-station field maps, in input order.
///
/// Lines before the first heading are dropped. Each block runs from its MAC
/// heading up to the next heading or the end of input.
pub fn parse_station_list(text: &str) -> Vec<(MacAddress, HashMap<&str, &str>)> {
    let mut stations = Vec::new();
    let mut state = State::SeekingHeading;

    for line in text.lines() {
        match Line::classify(line) {
            Line::MacHeading(mac) => {
                let previous = std::mem::replace(
                    &mut state,
                    State::InBlock {
                        mac,
                        fields: HashMap::new(),
                    },
                );
                if let State::InBlock { mac, fields } = previous {
                    stations.push((mac, fields));
                }
            }
            Line::KeyValue(key, value) => {
                if let State::InBlock { fields, .. } = &mut state {
                    fields.insert(key, value);
                }
            }
            Line::Ignored => {}
        }
    }

    if let State::InBlock { mac, fields } = state {
        stations.push((mac, fields));
    }

    stations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mac(s: &str) -> MacAddress {
        s.parse().unwrap()
    }

    #[test]
    fn test_classify_lines() {
        assert_eq!(
            Line::classify("aa:bb:cc:dd:ee:ff"),
            Line::MacHeading(mac("aa:bb:cc:dd:ee:ff"))
        );
        assert_eq!(
            Line::classify("aa:bb:cc:dd:ee:ff \r"),
            Line::MacHeading(mac("aa:bb:cc:dd:ee:ff"))
        );
        assert_eq!(Line::classify("signal=-40"), Line::KeyValue("signal", "-40"));
        assert_eq!(Line::classify("key="), Line::KeyValue("key", ""));
        assert_eq!(Line::classify("=value"), Line::Ignored);
        assert_eq!(Line::classify("Selected interface 'wlan0'"), Line::Ignored);
        assert_eq!(Line::classify(""), Line::Ignored);
        assert_eq!(Line::classify("aa:bb:cc:dd:ee:ff extra"), Line::Ignored);
    }

    #[test]
    fn test_parse_key_values_splits_at_first_equals() {
        let fields = parse_key_values("supported_rates=02 04 0b 16\nvht_caps_info=a=b=c\n");
        assert_eq!(fields.get("supported_rates"), Some(&"02 04 0b 16"));
        assert_eq!(fields.get("vht_caps_info"), Some(&"a=b=c"));
    }

    #[test]
    fn test_parse_key_values_one_entry_per_distinct_key() {
        let fields = parse_key_values("a=1\nb=2\na=3\n");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("a"), Some(&"3"));
        assert_eq!(fields.get("b"), Some(&"2"));
    }

    #[test]
    fn test_parse_key_values_empty_and_malformed() {
        assert!(parse_key_values("").is_empty());
        assert!(parse_key_values("FAIL\n\n   \n=orphan\n").is_empty());
    }

    #[test]
    fn test_parse_key_values_keeps_indexed_keys_verbatim() {
        let fields = parse_key_values("ssid[0]=Lab\nssid=Other\n");
        assert_eq!(fields.get("ssid[0]"), Some(&"Lab"));
        assert_eq!(fields.get("ssid"), Some(&"Other"));
    }

    #[test]
    fn test_parse_station_list_preserves_order() {
        let text = "\
11:22:33:44:55:66
signal=-40
connected_time=120
aa:bb:cc:dd:ee:ff
signal=-70
02:00:00:00:00:01
";
        let stations = parse_station_list(text);
        let macs: Vec<String> = stations.iter().map(|(m, _)| m.to_string()).collect();
        assert_eq!(
            macs,
            vec!["11:22:33:44:55:66", "aa:bb:cc:dd:ee:ff", "02:00:00:00:00:01"]
        );
        assert_eq!(stations[0].1.get("signal"), Some(&"-40"));
        assert_eq!(stations[0].1.get("connected_time"), Some(&"120"));
        assert_eq!(stations[1].1.get("signal"), Some(&"-70"));
        assert_eq!(stations[1].1.len(), 1);
        assert!(stations[2].1.is_empty());
    }

    #[test]
    fn test_parse_station_list_mac_value_does_not_split() {
        let text = "\
11:22:33:44:55:66
addr=aa:bb:cc:dd:ee:ff
dot11RSNAStatsSTAAddress=aa:bb:cc:dd:ee:ff
signal=-40
";
        let stations = parse_station_list(text);
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].0, mac("11:22:33:44:55:66"));
        assert_eq!(stations[0].1.get("addr"), Some(&"aa:bb:cc:dd:ee:ff"));
        assert_eq!(stations[0].1.get("signal"), Some(&"-40"));
    }

    #[test]
    fn test_parse_station_list_drops_lines_before_first_heading() {
        let text = "\
Selected interface 'wlan0'
signal=-10
11:22:33:44:55:66
signal=-40
";
        let stations = parse_station_list(text);
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].1.get("signal"), Some(&"-40"));
    }

    #[test]
    fn test_parse_station_list_without_headings() {
        assert!(parse_station_list("").is_empty());
        assert!(parse_station_list("signal=-40\nconnected_time=3\n").is_empty());
        assert!(parse_station_list("11:22:33:44:55:GG\nsignal=-1\n").is_empty());
    }

    #[test]
    fn test_parse_station_list_uppercase_mac_is_not_a_heading() {
        let text = "11:22:33:44:55:66\nsignal=-40\nAA:BB:CC:DD:EE:FF\nsignal=-99\n";
        let stations = parse_station_list(text);
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].1.get("signal"), Some(&"-99"));
    }
}
