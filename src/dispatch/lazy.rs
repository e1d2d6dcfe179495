use std::sync::OnceLock;

use crate::arg::IntoArgs;
use crate::error::{DefinitionError, NotImplemented};

use super::{Builder, Multimethod};

/// A multimethod built on first use.
///
/// Suitable for `static` items: the definition function runs exactly once,
/// even when several threads race on the first call, and every later call
/// reads the ranked list without locking.
///
/// ```ignore
/// static DESCRIBE: LazyMultimethod<String> = LazyMultimethod::new("describe", |b| {
///     b.method(|n: &i32| format!("int {n}"))
///      .method(|s: &String| format!("string {s}"))
/// });
/// ```
pub struct LazyMultimethod<R: 'static> {
    name: &'static str,
    define: fn(Builder<R>) -> Builder<R>,
    cell: OnceLock<Result<Multimethod<R>, DefinitionError>>,
}

impl<R: 'static> LazyMultimethod<R> {
    pub const fn new(name: &'static str, define: fn(Builder<R>) -> Builder<R>) -> Self {
        Self {
            name,
            define,
            cell: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Build now (if not built yet) and report definition errors.
    ///
    /// Host applications call this during start-up to surface bad
    /// definitions before the first dispatch.
    pub fn init(&self) -> Result<&Multimethod<R>, DefinitionError> {
        self.cell
            .get_or_init(|| {
                let built = (self.define)(Builder::new(self.name)).build();
                if let Err(error) = &built {
                    tracing::error!(%error, "multimethod definition rejected");
                }
                built
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Whether the definition has already run.
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }

    /// The built multimethod.
    ///
    /// # Panics
    ///
    /// If the definition is invalid. Use [`init`](Self::init) to handle that case.
    pub fn get(&self) -> &Multimethod<R> {
        match self.init() {
            Ok(multimethod) => multimethod,
            Err(error) => panic!("{error}"),
        }
    }

    pub fn call<'a>(&self, args: impl IntoArgs<'a>) -> Result<R, NotImplemented> {
        self.get().call(args)
    }
}
