use vocab::ResolveError;

/// log a failure and carry on with whatever succeeded
pub trait LoggableError<T> {
	fn info_failed(self, msg: &str) -> Option<T>;
	fn warn_failed(self, msg: &str) -> Option<T>;
	fn err_failed(self, msg: &str) -> Option<T>;
}

impl<T, E: std::fmt::Display> LoggableError<T> for Result<T, E> {
	fn info_failed(self, msg: &str) -> Option<T> {
		self.inspect_err(|e| tracing::info!("{msg} : {e}")).ok()
	}

	fn warn_failed(self, msg: &str) -> Option<T> {
		self.inspect_err(|e| tracing::warn!("{msg} : {e}")).ok()
	}

	fn err_failed(self, msg: &str) -> Option<T> {
		self.inspect_err(|e| tracing::error!("{msg} : {e}")).ok()
	}
}

/// resolver outcomes for documents which just weren't meant for us
pub trait SkipUnresolved<T, E> {
	/// unhandled and unmatched documents become `Ok(None)`, any other failure is kept
	fn skip_unresolved(self) -> Result<Option<T>, ResolveError<E>>;
}

impl<T, E: std::fmt::Display> SkipUnresolved<T, E> for Result<T, ResolveError<E>> {
	fn skip_unresolved(self) -> Result<Option<T>, ResolveError<E>> {
		match self {
			Ok(x) => Ok(Some(x)),
			Err(e) if e.is_unhandled() || e.is_unmatched() => {
				tracing::warn!("skipping document: {e}");
				Ok(None)
			},
			Err(e) => Err(e),
		}
	}
}

#[cfg(test)]
mod test {
	use vocab::{ResolveError, VocabError};

	use super::{LoggableError, SkipUnresolved};

	#[test]
	fn failures_are_logged_and_dropped() {
		let ok : Result<u32, VocabError> = Ok(3);
		assert_eq!(ok.warn_failed("counting"), Some(3));
		let failed : Result<u32, VocabError> = Err(VocabError::MissingType);
		assert_eq!(failed.info_failed("counting"), None);
	}

	#[test]
	fn only_foreign_and_unwanted_documents_are_skipped() {
		let unhandled : Result<(), ResolveError> = Err(VocabError::UnhandledType("ChatMessage".into()).into());
		assert!(matches!(unhandled.skip_unresolved(), Ok(None)));

		let unmatched : Result<(), ResolveError> = Err(VocabError::NoCallbackMatch("Person".into()).into());
		assert!(matches!(unmatched.skip_unresolved(), Ok(None)));

		let broken : Result<(), ResolveError> = Err(VocabError::MissingType.into());
		assert!(matches!(broken.skip_unresolved(), Err(ResolveError::Vocab(VocabError::MissingType))));

		let handled : Result<&str, ResolveError<String>> = Ok("done");
		assert!(matches!(handled.skip_unresolved(), Ok(Some("done"))));

		let refused : Result<(), ResolveError<String>> = Err(ResolveError::Handler("nope".into()));
		assert!(matches!(refused.skip_unresolved(), Err(ResolveError::Handler(_))));
	}
}
