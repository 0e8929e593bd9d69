use super::Error;

/// Error raised by an introspector while reading the database schema.
#[derive(Debug)]
pub(super) struct IntrospectionError {
    inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for IntrospectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for IntrospectionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "introspection failed: {}", self.inner)?;
        let mut source = self.inner.source();
        while let Some(err) = source {
            write!(f, ": {}", err)?;
            source = err.source();
        }
        Ok(())
    }
}

impl Error {
    /// Creates an error from a driver error raised during introspection.
    ///
    /// Drivers convert their native errors (rusqlite, io, ...) with this.
    pub fn introspection(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::Introspection(IntrospectionError {
            inner: Box::new(err),
        }))
    }

    /// Returns `true` if this error came from an introspector.
    pub fn is_introspection(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Introspection(_))
    }
}
