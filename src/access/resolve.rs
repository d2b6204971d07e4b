use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::Node;
use crate::access::{AccessError, ParseError, PathSpec, Segment};
use crate::ops::{Map, NodeKind, Record, Sequence};

// -----------------------------------------------------------------------------
// Error

/// An error returned from a failed path resolution.
#[derive(Debug, PartialEq, Eq)]
pub enum ResolveError<'a> {
    /// The path specification could not be parsed.
    /// See [`ParseError`] for details.
    Parse(ParseError),
    /// The root target is null and no default was given.
    NullTarget,
    /// A segment could not be resolved and no default was given.
    /// See [`AccessError`] for the failed segment and the low-level cause.
    Access(AccessError<'a>),
    /// The resolved value could not be downcast to the requested type.
    InvalidDowncast,
}

impl fmt::Display for ResolveError<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => fmt::Display::fmt(err, f),
            Self::NullTarget => f.write_str("cannot resolve a path against a null target"),
            Self::Access(err) => fmt::Display::fmt(err, f),
            Self::InvalidDowncast => {
                f.write_str("cannot downcast the resolved value to the requested type")
            }
        }
    }
}

impl core::error::Error for ResolveError<'_> {}

impl From<ParseError> for ResolveError<'_> {
    #[inline]
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

impl<'a> From<AccessError<'a>> for ResolveError<'a> {
    #[inline]
    fn from(value: AccessError<'a>) -> Self {
        Self::Access(value)
    }
}

// -----------------------------------------------------------------------------
// Resolution

/// Resolves `path` against `target`, returning the value at the end of the
/// path, or `default` when the path misses and a default was supplied.
///
/// This is the crate's entry point; the [`Resolve`] trait and [`Path`] wrap
/// it for method-call and reuse ergonomics.
///
/// # Rules
///
/// - A null root fails immediately — before any segment is consumed and
///   regardless of the specification — with [`ResolveError::NullTarget`], or
///   returns `default` when one is supplied.
/// - Each segment is looked up per the order documented on [`Segment`];
///   a miss returns `default` when supplied and
///   [`ResolveError::Access`] otherwise.
/// - A malformed specification fails with [`ResolveError::Parse`] even when
///   a default is supplied.
/// - The empty path resolves to `target` itself.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use delve::{Node, resolve};
///
/// let mut inner = BTreeMap::new();
/// inner.insert("c".to_string(), 123_i32);
/// let mut root = BTreeMap::new();
/// root.insert("b".to_string(), inner);
///
/// let node: &dyn Node = &root;
///
/// let found = resolve(node, "b.c", None).unwrap();
/// assert_eq!(found.downcast_ref::<i32>(), Some(&123));
///
/// let fallback = 0_i32;
/// let found = resolve(node, "b.missing", Some(&fallback)).unwrap();
/// assert_eq!(found.downcast_ref::<i32>(), Some(&0));
/// ```
pub fn resolve<'r, 'p>(
    target: &'r dyn Node,
    path: impl PathSpec<'p>,
    default: Option<&'r dyn Node>,
) -> Result<&'r dyn Node, ResolveError<'p>> {
    if matches!(target.kind(), NodeKind::Null) {
        return default.ok_or(ResolveError::NullTarget);
    }

    let mut location = target;
    for segment in path.segments() {
        // A malformed specification is not a miss: it fails even with a
        // default supplied.
        let segment = segment?;
        location = match segment.lookup(location) {
            Ok(value) => value,
            Err(err) => return default.ok_or(ResolveError::Access(err)),
        };
    }
    Ok(location)
}

// -----------------------------------------------------------------------------
// Trait for one-shot resolution

/// Provides path resolution as methods on any target value.
///
/// Implemented for every `T: Node` and for the `dyn Node` / capability trait
/// objects. The path is parsed during the call; for a path that is resolved
/// repeatedly, use [`Path`], which parses once.
///
/// # Examples
///
/// ```
/// use delve::{Resolve, derive::Node};
///
/// #[derive(Node)]
/// struct Listener {
///     port: u16,
/// }
///
/// #[derive(Node)]
/// struct Config {
///     listeners: Vec<Listener>,
/// }
///
/// let config = Config {
///     listeners: vec![Listener { port: 8080 }],
/// };
///
/// let port = config.resolve_as::<u16>("listeners.0.port").unwrap();
/// assert_eq!(*port, 8080);
/// ```
pub trait Resolve {
    /// Returns the value at the end of `path`.
    ///
    /// See [`resolve`] for the resolution rules.
    fn resolve<'p>(&self, path: impl PathSpec<'p>) -> Result<&dyn Node, ResolveError<'p>>;

    /// Returns the value at the end of `path`, or `default` when the path
    /// misses.
    ///
    /// A malformed specification still fails with [`ResolveError::Parse`].
    fn resolve_or<'r, 'p>(
        &'r self,
        path: impl PathSpec<'p>,
        default: &'r dyn Node,
    ) -> Result<&'r dyn Node, ResolveError<'p>>;

    /// Returns the value at the end of `path` downcast to `T`, failing with
    /// [`ResolveError::InvalidDowncast`] when the value has another type.
    fn resolve_as<'p, T: Node>(&self, path: impl PathSpec<'p>) -> Result<&T, ResolveError<'p>>;
}

impl Resolve for dyn Node {
    #[inline(never)]
    fn resolve<'p>(&self, path: impl PathSpec<'p>) -> Result<&dyn Node, ResolveError<'p>> {
        resolve(self, path, None)
    }

    #[inline(never)]
    fn resolve_or<'r, 'p>(
        &'r self,
        path: impl PathSpec<'p>,
        default: &'r dyn Node,
    ) -> Result<&'r dyn Node, ResolveError<'p>> {
        resolve(self, path, Some(default))
    }

    #[inline]
    fn resolve_as<'p, T: Node>(&self, path: impl PathSpec<'p>) -> Result<&T, ResolveError<'p>> {
        let value = Resolve::resolve(self, path)?;
        match value.downcast_ref::<T>() {
            Some(value) => Ok(value),
            None => Err(ResolveError::InvalidDowncast),
        }
    }
}

macro_rules! impl_resolve {
    () => {
        #[inline(always)]
        fn resolve<'p>(&self, path: impl PathSpec<'p>) -> Result<&dyn Node, ResolveError<'p>> {
            let node: &dyn Node = self;
            <dyn Node as Resolve>::resolve(node, path)
        }

        #[inline(always)]
        fn resolve_or<'r, 'p>(
            &'r self,
            path: impl PathSpec<'p>,
            default: &'r dyn Node,
        ) -> Result<&'r dyn Node, ResolveError<'p>> {
            let node: &dyn Node = self;
            <dyn Node as Resolve>::resolve_or(node, path, default)
        }

        #[inline(always)]
        fn resolve_as<'p, T: Node>(
            &self,
            path: impl PathSpec<'p>,
        ) -> Result<&T, ResolveError<'p>> {
            let node: &dyn Node = self;
            <dyn Node as Resolve>::resolve_as::<T>(node, path)
        }
    };
    (dyn $name:ident) => {
        impl Resolve for dyn $name {
            impl_resolve!();
        }
    };
    (T: $name:ident) => {
        impl<P: Sized + $name> Resolve for P {
            impl_resolve!();
        }
    };
}

impl_resolve!(T: Node);

impl_resolve!(dyn Map);
impl_resolve!(dyn Sequence);
impl_resolve!(dyn Record);

// -----------------------------------------------------------------------------
// Reusable parsed path

/// A reusable pre-parsed path, a thin wrapper over `Box<[Segment]>`.
///
/// Unlike the [`Resolve`] methods, which parse the specification on every
/// call, this type parses once during construction and resolves without
/// further parsing or allocation.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use delve::Path;
///
/// let mut map = BTreeMap::new();
/// map.insert("a".to_string(), vec![10_i32, 20]);
///
/// let path = Path::parse_static("a.1").unwrap();
/// assert_eq!(*path.resolve_as::<i32>(&map).unwrap(), 20);
///
/// map.insert("a".to_string(), vec![10_i32, 99]);
///
/// // reuse
/// assert_eq!(*path.resolve_as::<i32>(&map).unwrap(), 99);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path(Box<[Segment<'static>]>);

impl From<Box<[Segment<'static>]>> for Path {
    #[inline]
    fn from(value: Box<[Segment<'static>]>) -> Self {
        Self(value)
    }
}

impl Path {
    /// Parses the specification and creates a [`Path`].
    /// Returns [`ParseError`] if parsing fails.
    ///
    /// This function copies each segment's text into an owned string. For
    /// `&'static str` or another `impl PathSpec<'static>`, consider
    /// [`parse_static`], which stores the borrows instead.
    ///
    /// # Examples
    ///
    /// ```
    /// # use delve::Path;
    /// let spec = String::from("a.b.c");
    /// let path = Path::parse(spec.as_str()).unwrap();
    /// assert_eq!(path.len(), 3);
    /// ```
    ///
    /// [`parse_static`]: Path::parse_static
    pub fn parse<'p>(path: impl PathSpec<'p>) -> Result<Self, ParseError> {
        let mut segments = Vec::new();
        for segment in path.segments() {
            segments.push(segment?.into_owned());
        }
        Ok(Self(segments.into_boxed_slice()))
    }

    /// Parses the specification and creates a [`Path`], storing string
    /// references without copying.
    /// Returns [`ParseError`] if parsing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// # use delve::Path;
    /// let path = Path::parse_static("a.b.c").unwrap();
    /// assert_eq!(path.len(), 3);
    /// ```
    pub fn parse_static(path: impl PathSpec<'static>) -> Result<Self, ParseError> {
        let mut segments = Vec::new();
        for segment in path.segments() {
            segments.push(segment?);
        }
        Ok(Self(segments.into_boxed_slice()))
    }

    /// Returns the number of segments in the path.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the path has no segments.
    ///
    /// Resolving an empty path returns the target unchanged (unless the
    /// target is null).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn resolve_with<'r>(
        &self,
        target: &'r dyn Node,
        default: Option<&'r dyn Node>,
    ) -> Result<&'r dyn Node, ResolveError<'static>> {
        if matches!(target.kind(), NodeKind::Null) {
            return default.ok_or(ResolveError::NullTarget);
        }

        let mut location = target;
        for segment in &self.0 {
            location = match segment.lookup(location) {
                Ok(value) => value,
                Err(err) => return default.ok_or(ResolveError::Access(err)),
            };
        }
        Ok(location)
    }

    /// Returns the value at the end of this path within `target`.
    ///
    /// The path itself does not change and can be reused.
    #[inline]
    pub fn resolve<'r>(&self, target: &'r dyn Node) -> Result<&'r dyn Node, ResolveError<'static>> {
        self.resolve_with(target, None)
    }

    /// Returns the value at the end of this path within `target`, or
    /// `default` when the path misses.
    #[inline]
    pub fn resolve_or<'r>(
        &self,
        target: &'r dyn Node,
        default: &'r dyn Node,
    ) -> Result<&'r dyn Node, ResolveError<'static>> {
        self.resolve_with(target, Some(default))
    }

    /// Returns the value at the end of this path within `target`, downcast
    /// to `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use delve::Path;
    /// let data = vec![1_i32, 2, 3];
    /// let path = Path::parse_static("1").unwrap();
    ///
    /// let value = path.resolve_as::<i32>(&data).unwrap();
    /// assert_eq!(*value, 2);
    /// ```
    #[inline]
    pub fn resolve_as<'r, T: Node>(
        &self,
        target: &'r dyn Node,
    ) -> Result<&'r T, ResolveError<'static>> {
        let value = self.resolve_with(target, None)?;
        match value.downcast_ref::<T>() {
            Some(value) => Ok(value),
            None => Err(ResolveError::InvalidDowncast),
        }
    }

    /// Concatenates two paths.
    ///
    /// Segment offsets are kept as parsed, so error messages of the combined
    /// path report offsets of the originating strings.
    ///
    /// # Examples
    ///
    /// ```
    /// # use delve::Path;
    /// let head = Path::parse_static("a.b").unwrap();
    /// let tail = Path::parse_static("c").unwrap();
    /// let path = head.concat(tail);
    /// assert_eq!(path.len(), 3);
    /// ```
    pub fn concat(self, other: Path) -> Self {
        let mut segments = self.0.into_vec();
        segments.extend(other.0.into_vec());
        Self(segments.into_boxed_slice())
    }
}

impl<'a> PathSpec<'a> for &'a Path {
    fn segments(&self) -> impl Iterator<Item = Result<Segment<'a>, ParseError>> {
        self.0.iter().map(|segment| Ok(segment.reborrow()))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.0.iter().enumerate() {
            if position > 0 {
                f.write_str(".")?;
            }
            fmt::Display::fmt(segment, f)?;
        }
        Ok(())
    }
}
