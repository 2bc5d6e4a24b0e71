macro_rules! try_or_fail {
	( $e:expr ) => {
		match $e {
			Ok(v) => v,
			Err(e) => {
				return Control::Exit(Err(crate::ExitError::Exception(
					crate::ExitException::from(e),
				)))
			}
		}
	};
}

macro_rules! check_static {
	( $frame:expr ) => {
		if $frame.environment.is_static {
			return Control::Exit(crate::ExitException::StaticCallAlteration.into());
		}
	};
}
