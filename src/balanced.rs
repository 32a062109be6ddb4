//! A self-balancing BST (specifically, an AVL tree) storing a set of ordered elements. Every node
//! owns its children through a `Box` and there are no parent pointers. Operations that restructure
//! the tree recurse down to the affected node and, on the way back up, hand each parent the
//! (possibly new) root of its child subtree.
//!
//! # Examples
//!
//! ```
//! use avl_tree::balanced::Tree;
//! use avl_tree::error::TreeError;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.contains(&1));
//!
//! assert!(tree.insert(1));
//! assert!(tree.contains(&1));
//!
//! // Inserting an element that's already present changes nothing.
//! assert!(!tree.insert(1));
//! assert_eq!(tree.size(), 1);
//!
//! // Removing an element hands it back.
//! assert_eq!(tree.remove(&1), Ok(1));
//! assert_eq!(tree.remove(&1), Err(TreeError::NotFound));
//! ```

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::iter::FromIterator;
use std::mem;

use log::{debug, trace};

use crate::error::{Result, TreeError};

type Link<T> = Option<Box<Node<T>>>;

/// The height of a possibly empty subtree. An empty subtree has a height of `-1` so that a leaf
/// has a height of `0`.
fn height<T>(link: &Link<T>) -> isize {
    link.as_ref().map_or(-1, |n| n.height)
}

/// A self-balancing Binary Search Tree (specifically, an AVL tree) used as an ordered set. This
/// can be used for inserting, finding, and removing elements. Elements equal to one already in the
/// tree are never stored twice.
#[derive(Clone)]
pub struct Tree<T> {
    root: Link<T>,
    size: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("size", &self.size)
            .field("root", &self.root)
            .finish()
    }
}

impl<T> Tree<T> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: None,
            size: 0,
        }
    }

    /// The number of elements in the tree.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the tree holds no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drops every element in the tree.
    pub fn clear(&mut self) {
        self.root = None;
        self.size = 0;
    }

    /// The number of edges on the longest path from the root to a leaf. An empty tree has a height
    /// of `-1` and a tree with a single element has a height of `0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::balanced::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.height(), -1);
    ///
    /// tree.extend([1, 2, 3, 4]);
    /// assert_eq!(tree.height(), 2);
    /// ```
    pub fn height(&self) -> isize {
        height(&self.root)
    }

    /// The element stored at the root of the tree, if there is one.
    pub fn root(&self) -> Option<&T> {
        self.root.as_ref().map(|n| &n.element)
    }

    /// Elements in pre-order: a node, then its left subtree, then its right subtree.
    pub fn preorder(&self) -> Vec<&T> {
        let mut elements = Vec::with_capacity(self.size);
        if let Some(root) = &self.root {
            root.preorder(&mut elements);
        }
        elements
    }

    /// Elements in post-order: a node's left subtree, then its right subtree, then the node.
    pub fn postorder(&self) -> Vec<&T> {
        let mut elements = Vec::with_capacity(self.size);
        if let Some(root) = &self.root {
            root.postorder(&mut elements);
        }
        elements
    }

    /// Elements in in-order: a node's left subtree, then the node, then its right subtree. This
    /// yields the elements in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::balanced::Tree;
    ///
    /// let tree: Tree<_> = vec![3, 1, 2].into_iter().collect();
    /// assert_eq!(tree.inorder(), vec![&1, &2, &3]);
    /// ```
    pub fn inorder(&self) -> Vec<&T> {
        let mut elements = Vec::with_capacity(self.size);
        if let Some(root) = &self.root {
            root.inorder(&mut elements);
        }
        elements
    }

    /// Elements in level-order: breadth first, visiting each level left to right.
    pub fn levelorder(&self) -> Vec<&T> {
        let mut elements = Vec::with_capacity(self.size);
        let mut queue: VecDeque<&Node<T>> = self.root.as_deref().into_iter().collect();
        while let Some(front) = queue.pop_front() {
            elements.push(&front.element);
            queue.extend(front.left.as_deref());
            queue.extend(front.right.as_deref());
        }
        elements
    }
}

impl<T> Tree<T>
where
    T: Ord,
{
    /// Builds a tree from a sequence that may be, or may contain, absent elements. Elements are
    /// inserted in iteration order. If the sequence or any element in it is `None`, nothing is
    /// inserted and [`TreeError::InvalidArgument`] is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::balanced::Tree;
    /// use avl_tree::error::TreeError;
    ///
    /// let tree = Tree::try_from_options(Some(vec![Some(2), Some(1)])).unwrap();
    /// assert_eq!(tree.inorder(), vec![&1, &2]);
    ///
    /// let missing = Tree::try_from_options(Some(vec![Some(2), None]));
    /// assert_eq!(missing.unwrap_err(), TreeError::InvalidArgument);
    ///
    /// let absent = Tree::<i32>::try_from_options(None::<Vec<Option<i32>>>);
    /// assert_eq!(absent.unwrap_err(), TreeError::InvalidArgument);
    /// ```
    pub fn try_from_options<I>(data: Option<I>) -> Result<Self>
    where
        I: IntoIterator<Item = Option<T>>,
    {
        let Some(data) = data else {
            debug!("Rejecting bulk construction from an absent sequence");
            return Err(TreeError::InvalidArgument);
        };
        let elements = data
            .into_iter()
            .collect::<Option<Vec<T>>>()
            .ok_or_else(|| {
                debug!("Rejecting bulk construction from a sequence with an absent element");
                TreeError::InvalidArgument
            })?;

        Ok(elements.into_iter().collect())
    }

    /// Inserts the element into the tree, rebalancing as needed. Returns whether the element was
    /// newly inserted. Inserting an element equal to one already in the tree leaves the tree as it
    /// was.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::balanced::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(10));
    /// assert!(tree.insert(20));
    /// assert!(tree.insert(30));
    /// assert!(!tree.insert(30));
    ///
    /// assert_eq!(tree.root(), Some(&20));
    /// assert_eq!(tree.size(), 3);
    /// ```
    pub fn insert(&mut self, element: T) -> bool {
        let inserted = Node::insert(&mut self.root, element);
        if inserted {
            self.size += 1;
        }
        inserted
    }

    /// Removes the element equal to `element` from the tree and returns it. If the tree does not
    /// contain such an element, [`TreeError::NotFound`] is returned and the tree is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::balanced::Tree;
    /// use avl_tree::error::TreeError;
    ///
    /// let mut tree: Tree<_> = vec![5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    ///
    /// assert_eq!(tree.remove(&5), Ok(5));
    /// assert_eq!(tree.root(), Some(&4));
    /// assert_eq!(tree.remove(&42), Err(TreeError::NotFound));
    /// ```
    pub fn remove(&mut self, element: &T) -> Result<T> {
        let removed = Node::remove(&mut self.root, element);
        match removed {
            Ok(_) => self.size -= 1,
            Err(ref e) => debug!("Nothing removed: {}", e),
        }
        removed
    }

    /// Finds the element in the tree equal to `element`.
    pub fn get(&self, element: &T) -> Result<&T> {
        self.root
            .as_ref()
            .and_then(|n| n.find(element))
            .ok_or(TreeError::NotFound)
    }

    /// Whether the tree holds an element equal to `element`.
    pub fn contains(&self, element: &T) -> bool {
        self.get(element).is_ok()
    }

    /// The number of nodes on the path from the root to the node holding `element`, counting both
    /// ends. The root has a depth of `1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::balanced::Tree;
    ///
    /// let tree: Tree<_> = vec![2, 1, 3].into_iter().collect();
    ///
    /// assert_eq!(tree.depth(&2), Ok(1));
    /// assert_eq!(tree.depth(&3), Ok(2));
    /// assert!(tree.depth(&4).is_err());
    /// ```
    pub fn depth(&self, element: &T) -> Result<usize> {
        let mut depth = 1;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match element.cmp(&node.element) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Equal => return Ok(depth),
                Ordering::Greater => node.right.as_deref(),
            };
            depth += 1;
        }

        Err(TreeError::NotFound)
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

#[derive(Clone)]
struct Node<T> {
    element: T,
    left: Link<T>,
    right: Link<T>,

    /// Edges on the longest path down to a leaf. A node with no children has a height of 0.
    height: isize,
    /// `height(left) - height(right)`. Positive when the left subtree is taller.
    balance_factor: isize,
}

impl<T> fmt::Debug for Node<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("element", &self.element)
            .field("height", &self.height)
            .field("balance_factor", &self.balance_factor)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}

impl<T> Node<T> {
    fn new_boxed(element: T) -> Box<Self> {
        Box::new(Self {
            element,
            left: None,
            right: None,
            height: 0,
            balance_factor: 0,
        })
    }

    /// Recomputes the cached height and balance factor from the children.
    fn update(&mut self) {
        let left_height = height(&self.left);
        let right_height = height(&self.right);
        self.height = left_height.max(right_height) + 1;
        self.balance_factor = left_height - right_height;
    }

    /// Rotate self to the right. This moves the left child up vertically and self down vertically.
    /// Used to rebalance the tree when the left child is too tall. Without a left child there is
    /// nothing to rotate and `self` comes back untouched.
    ///
    /// # Diagram
    ///
    /// ```text
    ///   old_root (i.e. "self")    new_root
    ///    /     \                  /     \
    /// new_root  z     rotate ->  x    old_root
    ///  / \                               /  \
    /// x   y                             y    z
    /// ```
    fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        let Some(mut new_root) = self.left.take() else {
            return self;
        };
        trace!("Rotating right at height {}", self.height);

        self.left = new_root.right.take();
        self.update();

        new_root.right = Some(self);
        new_root.update();
        new_root
    }

    /// Mirror image of [`Node::rotate_right`]: the right child moves up and `self` becomes its
    /// left child.
    fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        let Some(mut new_root) = self.right.take() else {
            return self;
        };
        trace!("Rotating left at height {}", self.height);

        self.right = new_root.left.take();
        self.update();

        new_root.left = Some(self);
        new_root.update();
        new_root
    }

    fn preorder<'a>(&'a self, elements: &mut Vec<&'a T>) {
        elements.push(&self.element);
        if let Some(left) = &self.left {
            left.preorder(elements);
        }
        if let Some(right) = &self.right {
            right.preorder(elements);
        }
    }

    fn postorder<'a>(&'a self, elements: &mut Vec<&'a T>) {
        if let Some(left) = &self.left {
            left.postorder(elements);
        }
        if let Some(right) = &self.right {
            right.postorder(elements);
        }
        elements.push(&self.element);
    }

    fn inorder<'a>(&'a self, elements: &mut Vec<&'a T>) {
        if let Some(left) = &self.left {
            left.inorder(elements);
        }
        elements.push(&self.element);
        if let Some(right) = &self.right {
            right.inorder(elements);
        }
    }
}

impl<T> Node<T>
where
    T: Ord,
{
    fn find(&self, element: &T) -> Option<&T> {
        match element.cmp(&self.element) {
            Ordering::Less => self.left.as_ref().and_then(|n| n.find(element)),
            Ordering::Equal => Some(&self.element),
            Ordering::Greater => self.right.as_ref().and_then(|n| n.find(element)),
        }
    }

    /// Inserts `element` into the subtree at `link`, which is rebalanced if a node was created
    /// beneath it. Returns whether a node was created.
    fn insert(link: &mut Link<T>, element: T) -> bool {
        let Some(node) = link.as_mut() else {
            trace!("Creating node");
            *link = Some(Self::new_boxed(element));
            return true;
        };

        let inserted = match element.cmp(&node.element) {
            Ordering::Less => Self::insert(&mut node.left, element),
            Ordering::Equal => {
                node.update();
                false
            }
            Ordering::Greater => Self::insert(&mut node.right, element),
        };
        if inserted {
            Self::rebalance_link(link);
        }

        inserted
    }

    /// Removes the element equal to `element` from the subtree at `link`. Every node on the path
    /// back up is rebalanced, including the node whose element was replaced by its predecessor.
    fn remove(link: &mut Link<T>, element: &T) -> Result<T> {
        let node = link.as_mut().ok_or(TreeError::NotFound)?;
        let removed = match element.cmp(&node.element) {
            Ordering::Less => Self::remove(&mut node.left, element)?,
            Ordering::Greater => Self::remove(&mut node.right, element)?,
            Ordering::Equal => {
                let mut node = link.take().ok_or(TreeError::NotFound)?;
                match (node.left.take(), node.right.take()) {
                    (None, None) => {
                        trace!("Removing leaf");
                        node.element
                    }
                    (Some(child), None) | (None, Some(child)) => {
                        trace!("Replacing node with its only child");
                        *link = Some(child);
                        node.element
                    }
                    // With two children, the predecessor (the largest element in the left
                    // subtree) takes this node's place.
                    (Some(left), Some(right)) => {
                        trace!("Replacing node with its predecessor");
                        let (new_left, predecessor) = left.remove_largest();
                        let removed = mem::replace(&mut node.element, predecessor);
                        node.left = new_left;
                        node.right = Some(right);
                        *link = Some(node);
                        removed
                    }
                }
            }
        };

        Self::rebalance_link(link);
        Ok(removed)
    }

    /// Splits off the largest element of this subtree. Returns the rebalanced remainder of the
    /// subtree along with that element. The largest node has no right child so its left child
    /// takes its place.
    fn remove_largest(mut self: Box<Self>) -> (Link<T>, T) {
        match self.right.take() {
            None => {
                let Node { element, left, .. } = *self;
                (left, element)
            }
            Some(right) => {
                let (new_right, largest) = right.remove_largest();
                self.right = new_right;
                (Some(self.rebalance()), largest)
            }
        }
    }

    fn rebalance_link(link: &mut Link<T>) {
        if let Some(node) = link.take() {
            *link = Some(node.rebalance());
        }
    }

    /// Refreshes the cached height and balance factor and rotates if the subtrees differ in height
    /// by two. Returns the root of the rebalanced subtree.
    ///
    /// See https://en.wikipedia.org/wiki/AVL_tree#Rebalancing for terminology.
    fn rebalance(mut self: Box<Self>) -> Box<Self> {
        self.update();
        let new_root = match self.balance_factor {
            2 => {
                if self.left.as_ref().map_or(0, |n| n.balance_factor) < 0 {
                    self.left = self.left.take().map(Self::rotate_left);
                }
                self.rotate_right()
            }
            -2 => {
                if self.right.as_ref().map_or(0, |n| n.balance_factor) > 0 {
                    self.right = self.right.take().map(Self::rotate_right);
                }
                self.rotate_left()
            }
            _ => self,
        };

        if cfg!(debug_assertions) {
            let left_height = height(&new_root.left);
            let right_height = height(&new_root.right);
            assert_eq!(new_root.height, left_height.max(right_height) + 1);
            assert!((left_height - right_height).abs() <= 1);
            if let Some(left) = &new_root.left {
                assert!(left.element < new_root.element);
            }
            if let Some(right) = &new_root.right {
                assert!(right.element > new_root.element);
            }
        }
        new_root
    }
}
