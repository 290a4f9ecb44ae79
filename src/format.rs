/// Formats a data point or statistic with ~5 significant digits
pub fn value(x: f64) -> String {
    let abs = x.abs();

    if abs != 0.0 && (abs < 1e-3 || abs >= 1e6) {
        return format!("{:.4e}", x);
    }

    let sign = if x < 0.0 { "\u{2212}" } else { "" };

    format!("{}{}", sign, short(abs))
}

pub fn short(n: f64) -> String {
    if n < 10.0 {
        format!("{:.4}", n)
    } else if n < 100.0 {
        format!("{:.3}", n)
    } else if n < 1000.0 {
        format!("{:.2}", n)
    } else if n < 10000.0 {
        format!("{:.1}", n)
    } else {
        format!("{:.0}", n)
    }
}

/// `part` as a percentage of `total`
pub fn percent(part: usize, total: usize) -> String {
    if total == 0 {
        return "0.00%".to_owned();
    }

    format!("{:.2}%", 100. * part as f64 / total as f64)
}

/// Format a number with thousands separators.
fn thousands_sep(mut n: u64, sep: char) -> String {
    let mut groups = Vec::new();

    loop {
        let group = n % 1000;
        n /= 1000;

        if n == 0 {
            groups.push(group.to_string());
            break;
        }

        groups.push(format!("{:03}", group));
    }

    groups.reverse();
    groups.join(&sep.to_string())
}

/// Format a count, including thousands-separators.
pub fn integer(n: usize) -> String {
    thousands_sep(n as u64, ',')
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn short_max_len() {
        let mut float = 1.0;
        while float < 999_999.9 {
            let string = short(float);
            assert!(string.len() <= 6);
            float *= 2.0;
        }
    }

    #[test]
    fn values() {
        assert_eq!(value(0.0), "0.0000");
        assert_eq!(value(16.75), "16.750");
        assert_eq!(value(-7.0), "\u{2212}7.0000");
        assert_eq!(value(1.5e7), "1.5000e7");
    }

    #[test]
    fn percentages() {
        assert_eq!(percent(1, 12), "8.33%");
        assert_eq!(percent(0, 0), "0.00%");
    }

    #[test]
    fn integer_thousands_sep() {
        assert_eq!(integer(140_352_319), "140,352,319");
        assert_eq!(integer(10_000), "10,000");
        assert_eq!(integer(7), "7");
    }
}
