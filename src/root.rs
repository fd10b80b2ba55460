use crate::document::HostError;
use crate::host::HostConfig;
use std::fmt;

/// The reconciliation engine, as seen by application code.
///
/// The engine owns everything about a root: its virtual tree, its scheduling,
/// and when to invoke completion callbacks. A `Roots` only decides *which*
/// root a render goes to.
pub trait Reconciler<C: HostConfig> {
    /// The engine's opaque handle for a tree mounted into one container.
    type Root;

    /// The top-level render input, such as a virtual element.
    type Element;

    /// Whatever the engine returns from submitting a render.
    type Output;

    /// Create a new root for `container`.
    fn create_container(&mut self, host: &C, container: &C::Container) -> Self::Root;

    /// Submit `element` as the new top-level render input for `root`. The
    /// engine invokes `callback`, if any, once the resulting commit has been
    /// applied.
    fn update_container(
        &mut self,
        host: &C,
        element: Self::Element,
        root: &mut Self::Root,
        callback: Option<Box<dyn FnOnce()>>,
    ) -> Self::Output;
}

/// The mapping from containers to their roots, and the entry point that
/// application code renders through.
///
/// Each container gets exactly one root for the lifetime of the `Roots`.
/// Roots are created lazily on first render and are never removed.
pub struct Roots<C, R>
where
    C: HostConfig,
    R: Reconciler<C>,
{
    host: C,
    engine: R,
    // Few containers per application, so a linear scan is fine.
    roots: Vec<(C::Container, R::Root)>,
}

impl<C, R> fmt::Debug for Roots<C, R>
where
    C: HostConfig + fmt::Debug,
    C::Container: fmt::Debug,
    R: Reconciler<C>,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Roots")
            .field("host", &self.host)
            .field(
                "containers",
                &self.roots.iter().map(|(c, _)| c).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<C, R> Roots<C, R>
where
    C: HostConfig,
    C::Container: Clone + PartialEq,
    R: Reconciler<C>,
{
    /// Construct a new, empty mapping that renders through `engine` into
    /// `host`.
    pub fn new(host: C, engine: R) -> Roots<C, R> {
        Roots {
            host,
            engine,
            roots: Vec::new(),
        }
    }

    /// Render `element` into `container`.
    ///
    /// The container's root is created on the first render and reused for
    /// every later one. Returns whatever the engine returns.
    pub fn render(
        &mut self,
        element: R::Element,
        container: &C::Container,
        callback: Option<Box<dyn FnOnce()>>,
    ) -> R::Output {
        let index = match self.position(container) {
            Some(i) => i,
            None => self.insert(container),
        };
        let root = &mut self.roots[index].1;
        self.engine
            .update_container(&self.host, element, root, callback)
    }

    /// Explicitly create the root for `container`.
    ///
    /// Creating a second root for the same container is an error: it would
    /// mount a second, independent tree into it.
    pub fn create_root(&mut self, container: &C::Container) -> Result<&mut R::Root, HostError> {
        if self.position(container).is_some() {
            return Err(HostError::AlreadyRooted);
        }
        let index = self.insert(container);
        Ok(&mut self.roots[index].1)
    }

    /// The root for `container`, if it has one.
    pub fn root(&self, container: &C::Container) -> Option<&R::Root> {
        self.position(container).map(|i| &self.roots[i].1)
    }

    /// The number of containers with a root.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn host(&self) -> &C {
        &self.host
    }

    pub fn engine(&self) -> &R {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut R {
        &mut self.engine
    }

    fn position(&self, container: &C::Container) -> Option<usize> {
        self.roots.iter().position(|(c, _)| c == container)
    }

    fn insert(&mut self, container: &C::Container) -> usize {
        debug!("creating a new root");
        let root = self.engine.create_container(&self.host, container);
        self.roots.push((container.clone(), root));
        self.roots.len() - 1
    }
}
