//! Chat line formatting with `&` color markup

/// Sent to a player whose join was rejected at capacity
pub const MATCH_FULL: &str = "&c[!] This game is full.";

/// Roster-wide banner announcing a new participant
pub fn join_banner(name: &str, count: usize, max: usize) -> String {
    format!("&a[+] &6{name} &7({count}&a/&7{max})")
}

/// Roster-wide banner when the lobby commits to starting
pub fn countdown_begin(seconds: u32) -> String {
    format!("&a[*] The game will begin in {seconds} seconds...")
}

/// Periodic countdown reminder
pub fn countdown_mark(seconds: u32) -> String {
    format!("&e[*] Starting in {seconds} seconds...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_banner_carries_counts() {
        assert_eq!(join_banner("Ada", 2, 4), "&a[+] &6Ada &7(2&a/&74)");
    }

    #[test]
    fn countdown_begin_names_the_delay() {
        assert_eq!(
            countdown_begin(20),
            "&a[*] The game will begin in 20 seconds..."
        );
    }
}
