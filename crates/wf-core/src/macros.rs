/// Read a setting from the environment, falling back to the default declared in
/// `wf_core::config`. The `usize` form parses the value and warns on garbage.
#[macro_export]
macro_rules! get_wf_setting {
    ($setting:ident) => {
        ::std::env::var(stringify!($setting))
            .unwrap_or_else(|_| $crate::config::$setting.to_string())
    };
    ($setting:ident, usize) => {
        match ::std::env::var(stringify!($setting)) {
            Ok(v) => match v.trim().parse::<usize>() {
                Ok(i) => i,
                Err(_e) => {
                    ::log::warn!(
                        "Env var setting {}, is not a valid unsigned integer. Using default",
                        stringify!($setting)
                    );
                    $crate::config::$setting
                }
            },
            Err(_e) => $crate::config::$setting,
        }
    };
}
