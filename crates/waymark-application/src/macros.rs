//! Generator macros
//!
//! Compile-time replacement for an annotation processor. Each invocation
//! places fragments into [`ROUTE_FRAGMENTS`](crate::ports::ROUTE_FRAGMENTS)
//! under the reserved namespace, named by convention:
//!
//! - `waymark.generated.Waymark_Root_<module>`, one per `route_module!`
//! - `waymark.generated.Waymark_Group_<group>`, one per group
//! - `waymark.generated.<Type>_Extra`, one per `route_extras!` target
//!
//! The invoking crate must depend on `linkme`.

/// Declare the routes of one module
///
/// ```ignore
/// route_module! {
///     module app;
///     group app {
///         screen "/app/Main" => MainScreen,
///         screen "/app/Report" => ReportScreen = ReportScreen::open,
///         service "/app/Clock" => SystemClock as dyn Clock,
///     }
/// }
/// ```
///
/// `= ctor` names a `fn() -> Result<T, String>` used instead of `Default`.
#[macro_export]
macro_rules! route_module {
    (
        module $module:ident;
        $(
            group $group:ident {
                $( $kind:ident $path:literal => $target:ty $(as $contract:ty)? $(= $ctor:path)? ),* $(,)?
            }
        )+
    ) => {
        const _: () = {
            const GROUPS: &[(&str, $crate::ports::GroupAccessor)] = &[
                $(
                    (
                        stringify!($group),
                        $crate::__route_group!($( $kind $path => $target $(as $contract)? $(= $ctor)? ),*),
                    ),
                )+
            ];

            #[::linkme::distributed_slice($crate::ports::registry::ROUTE_FRAGMENTS)]
            static ROOT: $crate::ports::RouteFragment = $crate::ports::RouteFragment {
                name: concat!("waymark.generated.Waymark_Root_", stringify!($module)),
                ctor: $crate::ports::FragmentCtor::Root(|| $crate::generated::GeneratedRoot::boxed(GROUPS)),
            };
        };

        $(
            const _: () = {
                #[::linkme::distributed_slice($crate::ports::registry::ROUTE_FRAGMENTS)]
                static GROUP: $crate::ports::RouteFragment = $crate::ports::RouteFragment {
                    name: concat!("waymark.generated.Waymark_Group_", stringify!($group)),
                    ctor: $crate::ports::FragmentCtor::Group(
                        $crate::__route_group!($( $kind $path => $target $(as $contract)? $(= $ctor)? ),*),
                    ),
                };
            };
        )+
    };
}

/// Group accessor: a non-capturing closure usable as a `GroupAccessor`
#[doc(hidden)]
#[macro_export]
macro_rules! __route_group {
    ($( $kind:ident $path:literal => $target:ty $(as $contract:ty)? $(= $ctor:path)? ),*) => {
        (|| {
            $crate::generated::GeneratedGroup::boxed(|entries| {
                $( $crate::__route_entry!(entries, $kind $path => $target $(as $contract)? $(= $ctor)?); )*
            })
        }) as $crate::ports::GroupAccessor
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __route_entry {
    ($entries:ident, screen $path:literal => $target:ty = $ctor:path) => {
        $entries.add_screen($path, $crate::__private::TargetType::with_ctor::<$target>($ctor));
    };
    ($entries:ident, screen $path:literal => $target:ty) => {
        $entries.add_screen($path, $crate::__private::TargetType::of::<$target>());
    };
    ($entries:ident, service $path:literal => $target:ty as $contract:ty = $ctor:path) => {
        $entries.add_service(
            $path,
            $crate::__private::TargetType::with_ctor::<$target>($ctor),
            $crate::__private::ServiceBinding::new::<$target, $contract>(|service| service),
        );
    };
    ($entries:ident, service $path:literal => $target:ty as $contract:ty) => {
        $entries.add_service(
            $path,
            $crate::__private::TargetType::of::<$target>(),
            $crate::__private::ServiceBinding::new::<$target, $contract>(|service| service),
        );
    };
    ($entries:ident, service $path:literal => $target:ty = $ctor:path) => {
        $entries.add_service(
            $path,
            $crate::__private::TargetType::with_ctor::<$target>($ctor),
            $crate::__private::ServiceBinding::concrete::<$target>(),
        );
    };
    ($entries:ident, service $path:literal => $target:ty) => {
        $entries.add_service(
            $path,
            $crate::__private::TargetType::of::<$target>(),
            $crate::__private::ServiceBinding::concrete::<$target>(),
        );
    };
}

/// Declare the injectable fields of one or more types
///
/// ```ignore
/// route_extras! {
///     ProfileScreen {
///         age: i32,
///         name: Option<String>,
///         girl: bool = "boy",
///         clock: Option<Arc<dyn Clock>> = "/app/Clock",
///     }
/// }
/// ```
///
/// `= "key"` overrides the parameter name; for service references it is
/// the service path.
#[macro_export]
macro_rules! route_extras {
    ( $( $target:ident { $( $field:ident : $field_ty:ty $(= $key:literal)? ),* $(,)? } )+ ) => {
        $(
            const _: () = {
                fn build() -> $crate::__private::Result<Box<dyn $crate::__private::ExtraInjector>> {
                    let plan = $crate::__private::InjectorPlan::<$target>::builder(stringify!($target))
                        $(
                            .field::<$field_ty, _>(
                                stringify!($field),
                                None $(.or(Some($key)))?,
                                {
                                    fn access(target: &mut $target) -> &mut $field_ty {
                                        &mut target.$field
                                    }
                                    access
                                },
                            )
                        )*
                        .build()?;
                    let injector: Box<dyn $crate::__private::ExtraInjector> = Box::new(plan);
                    Ok(injector)
                }

                #[::linkme::distributed_slice($crate::ports::registry::ROUTE_FRAGMENTS)]
                static EXTRA: $crate::ports::RouteFragment = $crate::ports::RouteFragment {
                    name: concat!("waymark.generated.", stringify!($target), "_Extra"),
                    ctor: $crate::ports::FragmentCtor::Extra {
                        target: || ::std::any::TypeId::of::<$target>(),
                        build,
                    },
                };
            };
        )+
    };
}
