use std::io;

/// Helper function to read a line from stdin
pub fn read_line() -> io::Result<String> {
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Surface-level email shape check. The credential store itself matches
/// exactly what the user typed; this only catches obvious typos before a
/// round-trip is wasted on them.
pub fn is_valid_email(email: &str) -> bool {
    email.contains('@')
        && email.contains('.')
        && !email.contains(' ')
        && email.chars().filter(|&c| c == '@').count() == 1
        && email.len() >= 5
}

/// Prompt until the user enters a whole number inside `min..=max`.
pub fn prompt_number_in_range(label: &str, min: u32, max: u32) -> io::Result<u32> {
    loop {
        println!("{} [{}-{}]:", label, min, max);
        let input = read_line()?;
        match input.parse::<u32>() {
            Ok(value) if value >= min && value <= max => return Ok(value),
            _ => println!("Please enter a number between {} and {}.", min, max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shape_check_accepts_ordinary_addresses() {
        assert!(is_valid_email("patient@clinic.example"));
        assert!(is_valid_email("dr.lee+ward3@hospital.co.uk"));
        assert!(is_valid_email("a@x.com"));
    }

    #[test]
    fn test_email_shape_check_rejects_obvious_typos() {
        assert!(!is_valid_email("patient@clinic")); // no dot after the host
        assert!(!is_valid_email("patient clinic.example"));
        assert!(!is_valid_email("patient@@clinic.example"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_email_shape_check_rejects_surrounding_whitespace() {
        // The credential store matches the string exactly as entered, so an
        // address with stray whitespace must be caught here, before a store
        // round-trip is wasted on a lookup that can never match.
        assert!(!is_valid_email(" a@x.com"));
        assert!(!is_valid_email("a@x.com "));
    }
}
