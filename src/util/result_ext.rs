pub trait ResultExt<T, E> {
	/// Logs the error as a warning, tagged with `what`, and discards it.
	fn ok_or_warn(self, what: &str) -> Option<T>
	where
		E: std::fmt::Display;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
	fn ok_or_warn(self, what: &str) -> Option<T>
	where
		E: std::fmt::Display,
	{
		self
			.inspect_err(|error| tracing::warn!(%error, "{what}"))
			.ok()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ok_passes_through() {
		let result: Result<u32, String> = Ok(3);
		assert_eq!(result.ok_or_warn("unused"), Some(3));
	}

	#[test]
	fn err_is_discarded() {
		let result: Result<u32, String> = Err("bad".to_owned());
		assert_eq!(result.ok_or_warn("parsing"), None);
	}
}
