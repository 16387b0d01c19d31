use chrono::{DateTime, NaiveDateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParseError {
    pub input: String,
}

impl std::fmt::Display for DateParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "not an ISO 8601 date-time: {:?}", self.input)
    }
}

impl std::error::Error for DateParseError {}

/// Parse an ISO 8601 timestamp into a UTC instant.
///
/// A trailing `Z` means `+00:00`. Values without an offset are taken as UTC,
/// date-only values as midnight UTC.
pub fn normalize_timestamp(raw: &str) -> Result<DateTime<Utc>, DateParseError> {
    let err = || DateParseError { input: raw.to_string() };
    let s = match raw.strip_suffix('Z') {
        Some(head) => format!("{head}+00:00"),
        None => raw.to_string(),
    };

    // chrono is lenient about widths and whitespace, so the shape is
    // checked here and only the canonical form reaches the parser.
    let iso = canonical_iso(&s).ok_or_else(err)?;
    let frac = if iso.fraction { "%.f" } else { "" };
    if iso.offset {
        let fmt = format!("%Y-%m-%dT%H:%M:%S{frac}%:z");
        DateTime::parse_from_str(&iso.text, &fmt)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| err())
    } else {
        let fmt = format!("%Y-%m-%dT%H:%M:%S{frac}");
        NaiveDateTime::parse_from_str(&iso.text, &fmt)
            .map(|ndt| DateTime::<Utc>::from_naive_utc_and_offset(ndt, Utc))
            .map_err(|_| err())
    }
}

struct CanonicalIso {
    text: String,
    fraction: bool,
    offset: bool,
}

// Accepts `YYYY-MM-DD` optionally followed by `T` or one space, then `HH`,
// `HH:MM` or `HH:MM:SS[.f]`, then an optional `±HH`, `±HHMM` or `±HH:MM`.
// Returns the value rewritten as `YYYY-MM-DDTHH:MM:SS[.f][±HH:MM]`.
fn canonical_iso(s: &str) -> Option<CanonicalIso> {
    if !s.is_ascii() || s.len() < 10 || !matches_pattern(&s[..10], "dddd-dd-dd") {
        return None;
    }
    let date = &s[..10];
    if s.len() == 10 {
        return Some(CanonicalIso { text: format!("{date}T00:00:00"), fraction: false, offset: false });
    }
    if !matches!(s.as_bytes()[10], b'T' | b' ') {
        return None;
    }

    let rest = &s[11..];
    let (time, offset) = match rest.find(|c| c == '+' || c == '-') {
        Some(i) => (&rest[..i], Some(&rest[i..])),
        None => (rest, None),
    };
    let (clock, fraction) = match time.split_once('.') {
        Some((clock, f)) => (clock, Some(f)),
        None => (time, None),
    };

    let clock = if matches_pattern(clock, "dd:dd:dd") {
        clock.to_string()
    } else if fraction.is_none() && matches_pattern(clock, "dd:dd") {
        format!("{clock}:00")
    } else if fraction.is_none() && matches_pattern(clock, "dd") {
        format!("{clock}:00:00")
    } else {
        return None;
    };
    let fraction = match fraction {
        Some(f) if (1..=9).contains(&f.len()) && f.bytes().all(|b| b.is_ascii_digit()) => format!(".{f}"),
        Some(_) => return None,
        None => String::new(),
    };
    let offset = match offset {
        Some(o) => canonical_offset(o)?,
        None => String::new(),
    };

    Some(CanonicalIso {
        fraction: !fraction.is_empty(),
        offset: !offset.is_empty(),
        text: format!("{date}T{clock}{fraction}{offset}"),
    })
}

fn canonical_offset(o: &str) -> Option<String> {
    let (sign, body) = o.split_at(1);
    if matches_pattern(body, "dd:dd") {
        Some(o.to_string())
    } else if matches_pattern(body, "dddd") {
        Some(format!("{sign}{}:{}", &body[..2], &body[2..]))
    } else if matches_pattern(body, "dd") {
        Some(format!("{sign}{body}:00"))
    } else {
        None
    }
}

// `d` matches one ASCII digit, any other byte matches itself.
fn matches_pattern(s: &str, pattern: &str) -> bool {
    s.len() == pattern.len()
        && s.bytes().zip(pattern.bytes()).all(|(c, p)| match p {
            b'd' => c.is_ascii_digit(),
            _ => c == p,
        })
}

// RFC 2822 with a zero-padded day and numeric UTC offset, e.g.
// "Mon, 01 Jan 2024 00:00:00 +0000".
pub fn to_rfc2822(dt: DateTime<Utc>) -> String {
    dt.format("%a, %d %b %Y %H:%M:%S %z").to_string()
}

pub fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::from(std::time::UNIX_EPOCH)
}
