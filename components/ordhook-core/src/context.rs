use hiro_system_kit::slog;

/// Carries an optional logger through every engine entry point. Kept
/// separate from `EngineConfig` because tests construct it ad hoc via
/// [`Context::empty`] without building a full config.
#[derive(Clone)]
pub struct Context {
    pub logger: Option<slog::Logger>,
    pub tracer: bool,
}

impl Context {
    pub fn empty() -> Self {
        Self {
            logger: None,
            tracer: false,
        }
    }

    pub fn try_log<F>(&self, closure: F)
    where
        F: FnOnce(&slog::Logger),
    {
        if let Some(ref logger) = self.logger {
            closure(logger);
        }
    }
}

#[macro_export]
macro_rules! try_info {
    ($a:expr, $tag:expr, $($args:tt)*) => {
        $a.try_log(|l| hiro_system_kit::slog::info!(l, $tag, $($args)*));
    };
    ($a:expr, $tag:expr) => {
        $a.try_log(|l| hiro_system_kit::slog::info!(l, $tag));
    };
}

#[macro_export]
macro_rules! try_debug {
    ($a:expr, $tag:expr, $($args:tt)*) => {
        $a.try_log(|l| hiro_system_kit::slog::debug!(l, $tag, $($args)*));
    };
    ($a:expr, $tag:expr) => {
        $a.try_log(|l| hiro_system_kit::slog::debug!(l, $tag));
    };
}

#[macro_export]
macro_rules! try_warn {
    ($a:expr, $tag:expr, $($args:tt)*) => {
        $a.try_log(|l| hiro_system_kit::slog::warn!(l, $tag, $($args)*));
    };
    ($a:expr, $tag:expr) => {
        $a.try_log(|l| hiro_system_kit::slog::warn!(l, $tag));
    };
}

#[macro_export]
macro_rules! try_error {
    ($a:expr, $tag:expr, $($args:tt)*) => {
        $a.try_log(|l| hiro_system_kit::slog::error!(l, $tag, $($args)*));
    };
    ($a:expr, $tag:expr) => {
        $a.try_log(|l| hiro_system_kit::slog::error!(l, $tag));
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_context_never_panics_on_log() {
        let ctx = Context::empty();
        try_info!(ctx, "unreachable since logger is None: {}", 1);
    }
}
