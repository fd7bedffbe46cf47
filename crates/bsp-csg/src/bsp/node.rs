//! BSP tree node implementation.

use std::mem;

use nalgebra::Point3;
use tracing::{debug, trace, warn};

use crate::error::{CsgError, Result};
use crate::{CoplanarPolicy, CsgConfig, Cuttable, Plane, Polygon};

use super::selector::{FirstPolygon, PlaneSelector};

/// A node in a solid BSP tree.
///
/// Each node partitions space using a splitting plane and stores polygons
/// that are coplanar with that plane. Everything else lives in the front
/// or back subtrees. A node exclusively owns its children; cloning a node
/// deep-copies the whole subtree.
///
/// # Solid semantics
///
/// The tree describes a solid as well as a set of polygons: a missing
/// `front` child stands for empty space in front of the plane, a missing
/// `back` child for solid material behind it. A node without a plane is an
/// empty leaf.
#[derive(Debug)]
pub struct BspNode<S = ()> {
    /// The splitting plane, set by the first `build` that sees a polygon.
    plane: Option<Plane>,

    /// Polygons coplanar with the plane, facing either way.
    polygons: Vec<Polygon<S>>,

    /// Subtree in FRONT of the splitting plane.
    front: Option<Box<BspNode<S>>>,

    /// Subtree BEHIND the splitting plane.
    back: Option<Box<BspNode<S>>>,
}

impl<S> Default for BspNode<S> {
    fn default() -> Self {
        Self {
            plane: None,
            polygons: Vec::new(),
            front: None,
            back: None,
        }
    }
}

// Clone and Drop walk the tree on explicit stacks; the derived versions
// recurse once per level and overflow on trees built from deep input.
impl<S: Clone> Clone for BspNode<S> {
    fn clone(&self) -> Self {
        let mut root = self.clone_node();
        {
            let mut stack: Vec<(&BspNode<S>, &mut BspNode<S>)> = vec![(self, &mut root)];
            while let Some((source, target)) = stack.pop() {
                let BspNode { front, back, .. } = target;
                if let Some(child) = source.front() {
                    stack.push((child, front.insert(Box::new(child.clone_node())).as_mut()));
                }
                if let Some(child) = source.back() {
                    stack.push((child, back.insert(Box::new(child.clone_node())).as_mut()));
                }
            }
        }
        root
    }
}

impl<S> Drop for BspNode<S> {
    fn drop(&mut self) {
        let mut stack: Vec<Box<BspNode<S>>> = Vec::new();
        stack.extend(self.front.take());
        stack.extend(self.back.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.front.take());
            stack.extend(node.back.take());
        }
    }
}

impl<S: Clone> BspNode<S> {
    /// Copies the plane and polygons of this node, without children.
    fn clone_node(&self) -> Self {
        Self {
            plane: self.plane,
            polygons: self.polygons.clone(),
            front: None,
            back: None,
        }
    }

    /// Creates an empty leaf node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tree from a polygon list using [`FirstPolygon`] plane selection.
    pub fn from_polygons(polygons: Vec<Polygon<S>>) -> Result<Self> {
        let mut node = Self::new();
        node.build(polygons)?;
        Ok(node)
    }

    /// Returns the splitting plane, if one has been established.
    #[inline]
    pub fn plane(&self) -> Option<&Plane> {
        self.plane.as_ref()
    }

    /// Returns the polygons stored directly at this node.
    #[inline]
    pub fn polygons(&self) -> &[Polygon<S>] {
        &self.polygons
    }

    /// Returns a reference to the front child subtree.
    #[inline]
    pub fn front(&self) -> Option<&BspNode<S>> {
        self.front.as_deref()
    }

    /// Returns a reference to the back child subtree.
    #[inline]
    pub fn back(&self) -> Option<&BspNode<S>> {
        self.back.as_deref()
    }

    /// Checks if this node has any children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.front.is_none() && self.back.is_none()
    }

    /// Returns the total number of polygons in this subtree.
    pub fn polygon_count(&self) -> usize {
        self.nodes().map(|n| n.polygons.len()).sum()
    }

    /// Returns the depth of this subtree (1 for a single node).
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            stack.extend(node.front().map(|n| (n, depth + 1)));
            stack.extend(node.back().map(|n| (n, depth + 1)));
        }
        max_depth
    }

    /// Incorporates `polygons` into the tree using [`FirstPolygon`] plane selection.
    pub fn build(&mut self, polygons: Vec<Polygon<S>>) -> Result<()> {
        self.build_with(polygons, &FirstPolygon)
    }

    /// Incorporates `polygons` into the tree.
    ///
    /// A node without a plane takes the plane of the polygon chosen by
    /// `selector`. Each polygon is split by the node's plane: coplanar
    /// pieces are stored at the node, front and back pieces are pushed
    /// into (lazily created) children. Malformed polygons are skipped
    /// with a warning.
    pub fn build_with<P: PlaneSelector>(
        &mut self,
        polygons: Vec<Polygon<S>>,
        selector: &P,
    ) -> Result<()> {
        let polygons: Vec<Polygon<S>> = polygons
            .into_iter()
            .enumerate()
            .filter_map(|(index, polygon)| match polygon.validate() {
                Ok(()) => Some(polygon),
                Err(error) => {
                    warn!(index, %error, "skipping malformed polygon");
                    None
                }
            })
            .collect();

        let mut stack: Vec<(&mut BspNode<S>, Vec<Polygon<S>>)> = vec![(self, polygons)];

        while let Some((node, polygons)) = stack.pop() {
            if polygons.is_empty() {
                continue;
            }

            let plane = match node.plane {
                Some(plane) => plane,
                None => {
                    let Some(splitter) = selector.select(&polygons) else {
                        continue;
                    };
                    let plane = *splitter.plane();
                    node.plane = Some(plane);
                    plane
                }
            };

            let mut front_list = Vec::new();
            let mut back_list = Vec::new();
            for polygon in &polygons {
                let split = polygon
                    .split(&plane)
                    .map_err(|source| CsgError::Build {
                        source: Box::new(source),
                    })?;
                node.polygons.extend(split.coplanar_front);
                node.polygons.extend(split.coplanar_back);
                front_list.extend(split.front);
                back_list.extend(split.back);
            }

            let BspNode { front, back, .. } = node;
            if !front_list.is_empty() {
                stack.push((front.get_or_insert_with(Default::default).as_mut(), front_list));
            }
            if !back_list.is_empty() {
                stack.push((back.get_or_insert_with(Default::default).as_mut(), back_list));
            }
        }

        Ok(())
    }

    /// Removes the parts of `polygons` that lie inside the solid described
    /// by this tree and returns what remains.
    ///
    /// This is a query: the tree itself is never modified. Recursion stops
    /// at `config.max_depth`, past which polygons pass through unclipped.
    /// Errors are tagged with the depth at which they occurred.
    pub fn clip_polygons(
        &self,
        polygons: Vec<Polygon<S>>,
        config: &CsgConfig,
    ) -> Result<Vec<Polygon<S>>> {
        self.clip_polygons_at(polygons, 0, config)
    }

    fn clip_polygons_at(
        &self,
        polygons: Vec<Polygon<S>>,
        depth: usize,
        config: &CsgConfig,
    ) -> Result<Vec<Polygon<S>>> {
        if depth > config.max_depth {
            debug!(depth, count = polygons.len(), "clip depth ceiling reached");
            return Ok(polygons);
        }

        if polygons.len() <= config.chunk_size {
            return self.clip_chunk(polygons, depth, config);
        }

        trace!(depth, count = polygons.len(), chunk_size = config.chunk_size, "clipping in chunks");
        let mut result = Vec::with_capacity(polygons.len());
        let mut remaining = polygons.into_iter();
        loop {
            let chunk: Vec<Polygon<S>> = remaining.by_ref().take(config.chunk_size).collect();
            if chunk.is_empty() {
                break;
            }
            result.extend(self.clip_chunk(chunk, depth, config)?);
        }
        Ok(result)
    }

    fn clip_chunk(
        &self,
        polygons: Vec<Polygon<S>>,
        depth: usize,
        config: &CsgConfig,
    ) -> Result<Vec<Polygon<S>>> {
        let Some(plane) = &self.plane else {
            return Ok(polygons);
        };

        let mut front = Vec::new();
        let mut back = Vec::new();
        for polygon in &polygons {
            let split = polygon.split(plane).map_err(|source| CsgError::Clip {
                depth,
                source: Box::new(source),
            })?;
            front.extend(split.front);
            back.extend(split.back);
            front.extend(split.coplanar_front);
            match config.coplanar {
                CoplanarPolicy::ByOrientation => back.extend(split.coplanar_back),
                CoplanarPolicy::Exterior => front.extend(split.coplanar_back),
            }
        }

        let front = match &self.front {
            Some(node) => node.clip_polygons_at(front, depth + 1, config)?,
            None => front,
        };
        // No back child: everything behind the plane is solid.
        let back = match &self.back {
            Some(node) => node.clip_polygons_at(back, depth + 1, config)?,
            None => Vec::new(),
        };

        let mut result = front;
        result.extend(back);
        Ok(result)
    }

    /// Removes every polygon in this tree that lies inside `other`.
    ///
    /// Past half of `config.max_depth` the traversal continues on an
    /// explicit stack limited to `config.max_iterations` nodes; nodes past
    /// either limit keep their polygons unclipped. On error the tree is left
    /// partially clipped.
    pub fn clip_to(&mut self, other: &BspNode<S>, config: &CsgConfig) -> Result<()> {
        self.clip_to_at(other, 0, config)
    }

    fn clip_to_at(&mut self, other: &BspNode<S>, depth: usize, config: &CsgConfig) -> Result<()> {
        if depth > config.max_depth {
            debug!(depth, "clip_to depth ceiling reached");
            return Ok(());
        }
        if depth > config.iterative_threshold() {
            return self.clip_to_iterative(other, depth, config);
        }

        self.polygons = other.clip_polygons(mem::take(&mut self.polygons), config)?;
        if let Some(front) = self.front.as_deref_mut() {
            front.clip_to_at(other, depth + 1, config)?;
        }
        if let Some(back) = self.back.as_deref_mut() {
            back.clip_to_at(other, depth + 1, config)?;
        }
        Ok(())
    }

    fn clip_to_iterative(
        &mut self,
        other: &BspNode<S>,
        depth: usize,
        config: &CsgConfig,
    ) -> Result<()> {
        trace!(depth, "clip_to switching to explicit stack");
        let mut stack: Vec<(&mut BspNode<S>, usize)> = vec![(self, depth)];
        let mut iterations = 0;

        while let Some((node, depth)) = stack.pop() {
            if iterations >= config.max_iterations {
                debug!(
                    iterations,
                    pending = stack.len() + 1,
                    "clip_to iteration limit reached"
                );
                break;
            }
            iterations += 1;

            if depth > config.max_depth {
                debug!(depth, "clip_to depth ceiling reached");
                continue;
            }

            node.polygons = other.clip_polygons(mem::take(&mut node.polygons), config)?;

            // Back first so the front subtree is visited first.
            let BspNode { front, back, .. } = node;
            stack.extend(back.as_deref_mut().map(|n| (n, depth + 1)));
            stack.extend(front.as_deref_mut().map(|n| (n, depth + 1)));
        }

        Ok(())
    }

    /// Complements the solid in place: every polygon and plane is flipped
    /// and the front and back subtrees trade places, at every node.
    pub fn invert(&mut self) {
        let mut stack: Vec<&mut BspNode<S>> = vec![self];
        while let Some(node) = stack.pop() {
            for polygon in &mut node.polygons {
                polygon.flip();
            }
            if let Some(plane) = node.plane.as_mut() {
                plane.flip();
            }
            mem::swap(&mut node.front, &mut node.back);

            let BspNode { front, back, .. } = node;
            stack.extend(front.as_deref_mut());
            stack.extend(back.as_deref_mut());
        }
    }

    /// Collects all polygons: this node's, then the front subtree's, then
    /// the back subtree's.
    pub fn all_polygons(&self) -> Vec<Polygon<S>> {
        let mut result = Vec::with_capacity(self.polygon_count());
        for node in self.nodes() {
            result.extend(node.polygons.iter().cloned());
        }
        result
    }

    /// Classifies a point against the solid described by this tree.
    ///
    /// Meaningful for trees built from the boundary of a closed,
    /// outward-wound solid. Points on a splitting plane count as in front.
    pub fn contains_point(&self, point: &Point3<f64>) -> bool {
        let mut node = self;
        loop {
            let Some(plane) = &node.plane else {
                return false;
            };
            if plane.signed_distance(point) >= 0.0 {
                match node.front() {
                    Some(front) => node = front,
                    None => return false,
                }
            } else {
                match node.back() {
                    Some(back) => node = back,
                    None => return true,
                }
            }
        }
    }

    /// Pre-order iterator over the nodes of this subtree (node, front, back).
    fn nodes(&self) -> impl Iterator<Item = &BspNode<S>> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.back());
            stack.extend(node.front());
            Some(node)
        })
    }
}
