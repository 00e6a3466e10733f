/// Whether a declared name is exported: its first character is an upper-case letter.
pub fn is_exported(name: &str) -> bool {
	name.chars().next().is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
	use super::is_exported;

	#[test]
	fn upper_case_initial_is_exported() {
		assert!(is_exported("Name"));
		assert!(is_exported("Ärger"));
		assert!(is_exported("X"));
	}

	#[test]
	fn other_initials_are_not_exported() {
		assert!(!is_exported("iAmPrivate"));
		assert!(!is_exported("_Hidden"));
		assert!(!is_exported("名前"));
		assert!(!is_exported(""));
	}
}
