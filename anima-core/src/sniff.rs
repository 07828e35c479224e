/// Candidate delimiters, checked in this order.
const CANDIDATES: &[u8] = &[b',', b';', b'\t'];

/// Picks the field delimiter of a delimited text file from a bounded
/// sample of its content.
///
/// Counts each candidate (comma, semicolon, tab) on the first non-empty
/// line of the sample, ignoring bytes inside double-quoted regions. The
/// candidate with the strictly highest count wins. An empty sample, a line
/// with no candidate at all, or a tie falls back to comma.
///
/// # Arguments
///
/// * `sample` - A prefix of the file's raw bytes (any leading byte-order
///   mark already removed). The sample may end mid-line.
pub fn sniff_delimiter(sample: &[u8]) -> u8 {
    let Some(line) = first_non_empty_line(sample) else {
        return b',';
    };

    let mut best = b',';
    let mut best_count = 0usize;
    let mut tied = false;
    for &candidate in CANDIDATES {
        let count = count_outside_quotes(line, candidate);
        if count > best_count {
            best = candidate;
            best_count = count;
            tied = false;
        } else if count > 0 && count == best_count {
            tied = true;
        }
    }

    if best_count == 0 || tied {
        return b',';
    }
    best
}

fn first_non_empty_line(sample: &[u8]) -> Option<&[u8]> {
    sample
        .split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .find(|line| !line.iter().all(|b| b.is_ascii_whitespace()))
}

fn count_outside_quotes(line: &[u8], target: u8) -> usize {
    let mut in_quotes = false;
    let mut count = 0;
    for &b in line {
        if b == b'"' {
            in_quotes = !in_quotes;
        } else if b == target && !in_quotes {
            count += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_comma() {
        assert_eq!(sniff_delimiter(b"full_date,note\n2024-01-01,hi\n"), b',');
    }

    #[test]
    fn detects_semicolon() {
        assert_eq!(sniff_delimiter(b"full_date;note\n2024-01-01;hi\n"), b';');
    }

    #[test]
    fn detects_tab() {
        assert_eq!(sniff_delimiter(b"full_date\tnote\n2024-01-01\thi\n"), b'\t');
    }

    #[test]
    fn picks_the_most_frequent_candidate() {
        // One stray comma inside the line should not beat three semicolons.
        assert_eq!(sniff_delimiter(b"a;b;c,d;e\n"), b';');
    }

    #[test]
    fn quoted_regions_do_not_count() {
        assert_eq!(sniff_delimiter(b"date;\"a,b,c,d\";note\n"), b';');
    }

    #[test]
    fn tie_falls_back_to_comma() {
        assert_eq!(sniff_delimiter(b"a,b;c,d;e\n"), b',');
        assert_eq!(sniff_delimiter(b"a;b\tc;d\te\n"), b',');
    }

    #[test]
    fn no_candidates_fall_back_to_comma() {
        assert_eq!(sniff_delimiter(b"just one header\n"), b',');
    }

    #[test]
    fn empty_sample_falls_back_to_comma() {
        assert_eq!(sniff_delimiter(b""), b',');
        assert_eq!(sniff_delimiter(b"\n\n  \n"), b',');
    }

    #[test]
    fn leading_blank_lines_are_skipped() {
        assert_eq!(sniff_delimiter(b"\n  \nfull_date;note\n"), b';');
    }

    #[test]
    fn crlf_lines_are_handled() {
        assert_eq!(sniff_delimiter(b"full_date;note\r\n2024-01-01;hi\r\n"), b';');
    }

    #[test]
    fn sample_cut_mid_line_still_detects() {
        assert_eq!(sniff_delimiter(b"full_date;mood;no"), b';');
    }
}
