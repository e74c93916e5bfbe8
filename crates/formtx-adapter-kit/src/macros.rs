#[macro_export]
macro_rules! diagnosed_error {
    ($($arg:tt)*) => {{
        let res = format_args!($($arg)*).to_string();
        $crate::types::diagnostics::Diagnostic::error_from_string(res)
    }};
}

#[macro_export]
macro_rules! define_ui_kit {
    ({
        id: $id:expr,
        name: $name:expr,
        documentation: $doc:expr,
        dependencies: [$($dep_name:expr => $dep_req:expr),* $(,)?],
    }) => {
        {
            let mut dependencies = $crate::indexmap::IndexMap::new();
            $(
                dependencies.insert(String::from($dep_name), String::from($dep_req));
            )*
            $crate::types::ui_kits::UiKitDescriptor {
                id: String::from($id),
                name: String::from($name),
                documentation: String::from($doc),
                dependencies,
            }
        }
    };
}
