//! Reference-counted heap blocks.
//!
//! The payload of a value with a reference-counted tag points to a block whose first field is a
//! [RefCountHeader]. This module allocates such blocks ([BlockRc]) and implements the dup/free
//! protocol over raw values ([dup_value], [free_value]).
//!
//! # Layout
//!
//! ```text
//! +----------------+------------+---------+---+
//! | RefCountHeader | release fn | padding | T |
//! +----------------+------------+---------+---+
//! ```
//!
//! The release function is monomorphized for `T` when the block is allocated. It drops the body
//! and deallocates the block, which lets [free_raw] reclaim a block knowing only its header.
//!
//! The counter isn't atomic: blocks, and values pointing to them, must stay on one thread.
use std::{cell::Cell, fmt, marker::PhantomData, mem::ManuallyDrop, ops::Deref, ptr::NonNull};

use crate::{
    error::ValueError,
    metrics::{adjust, increment},
    tag::ValueTag,
    value::JsValue,
};

/// The leading field of every reference-counted block: a single counter.
#[repr(C)]
pub struct RefCountHeader {
    ref_count: Cell<i32>,
}

impl RefCountHeader {
    /// Creates a header with a reference count of one.
    pub const fn new() -> Self {
        RefCountHeader {
            ref_count: Cell::new(1),
        }
    }

    /// Returns the current reference count.
    pub fn get(&self) -> i32 {
        self.ref_count.get()
    }

    fn incr(&self) {
        let count = self
            .ref_count
            .get()
            .checked_add(1)
            .expect("reference count overflow");
        self.ref_count.set(count);
    }

    /// Decrements the count and returns the new value.
    fn decr(&self) -> i32 {
        let count = self.ref_count.get() - 1;
        debug_assert!(count >= 0, "reference count underflow");
        self.ref_count.set(count);
        count
    }
}

impl Default for RefCountHeader {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RefCountHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefCountHeader")
            .field("ref_count", &self.get())
            .finish()
    }
}

type ReleaseFn = unsafe fn(NonNull<RefCountHeader>);

/// The part of a block that doesn't depend on the body type. Since [Block] is `repr(C)`, a
/// pointer to any block is a valid pointer to its prefix.
#[repr(C)]
struct BlockPrefix {
    header: RefCountHeader,
    release: ReleaseFn,
}

#[repr(C)]
struct Block<T> {
    prefix: BlockPrefix,
    body: T,
}

/// Drops the body and deallocates a block allocated by [BlockRc::new] for a body of type `T`.
///
/// # Safety
///
/// `header` must point to a live `Block<T>` allocated by [BlockRc::new] whose count is zero.
unsafe fn release<T>(header: NonNull<RefCountHeader>) {
    increment!("BlockRc::release");
    adjust!("BlockRc::live", -1);
    log::trace!("releasing block at {:p}", header.as_ptr());

    drop(Box::from_raw(header.cast::<Block<T>>().as_ptr()));
}

/// An owning pointer to a reference-counted block holding a `T`, similar to [std::rc::Rc].
///
/// As opposed to `Rc`, the count lives in a [RefCountHeader] at the very start of the block, and
/// the block can be reclaimed through a type-erased header pointer (see [free_raw]). Converting
/// a block to a raw value with [Self::into_value] transfers the reference owned by the block to
/// the value.
pub struct BlockRc<T> {
    ptr: NonNull<Block<T>>,
    _marker: PhantomData<Block<T>>,
}

impl<T> BlockRc<T> {
    /// Allocates a new block with a reference count of one.
    pub fn new(body: T) -> Self {
        increment!("BlockRc::new");
        adjust!("BlockRc::live", 1);

        let block = Box::new(Block {
            prefix: BlockPrefix {
                header: RefCountHeader::new(),
                release: release::<T>,
            },
            body,
        });

        BlockRc {
            ptr: NonNull::from(Box::leak(block)),
            _marker: PhantomData,
        }
    }

    fn block(&self) -> &Block<T> {
        // Safety: `self.ptr` is valid as long as `self` holds a reference.
        unsafe { self.ptr.as_ref() }
    }

    /// Returns the header of this block.
    pub fn header(&self) -> &RefCountHeader {
        &self.block().prefix.header
    }

    pub fn ref_count(&self) -> i32 {
        self.header().get()
    }

    /// Returns a pointer to the header of this block, without affecting the reference count.
    pub fn header_ptr(&self) -> NonNull<RefCountHeader> {
        self.ptr.cast()
    }

    /// Returns a reference to the body.
    pub fn get(&self) -> &T {
        &self.block().body
    }

    /// Returns a mutable reference to the body if this block is 1-reference counted, or `None`
    /// if it is shared. Same as [std::rc::Rc::get_mut].
    pub fn get_mut(&mut self) -> Option<&mut T> {
        if self.ref_count() == 1 {
            // Safety: we hold the only reference to the block and borrow it mutably.
            Some(unsafe { &mut self.ptr.as_mut().body })
        } else {
            None
        }
    }

    /// Converts this block to a pointer to its header, transferring the reference held by
    /// `self` to the caller. See [Self::from_raw].
    pub fn into_raw(self) -> NonNull<RefCountHeader> {
        // We must avoid dropping `self` here, which would decrement the reference count.
        let this = ManuallyDrop::new(self);
        this.ptr.cast()
    }

    /// Converts a raw header pointer back to a block, taking over one reference.
    ///
    /// # Safety
    ///
    /// Similar to [std::rc::Rc::from_raw]: `ptr` must be null or point to a live block allocated
    /// by [BlockRc::new] with a body of type `T`, and the caller must own one of its references.
    pub unsafe fn from_raw(ptr: *mut RefCountHeader) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| BlockRc {
            ptr: ptr.cast(),
            _marker: PhantomData,
        })
    }

    /// Same as [Self::from_raw] without the null check.
    ///
    /// # Safety
    ///
    /// Same conditions as for [Self::from_raw], plus `ptr` must not be null.
    pub unsafe fn from_raw_unchecked(ptr: *mut RefCountHeader) -> Self {
        BlockRc {
            ptr: NonNull::new_unchecked(ptr).cast(),
            _marker: PhantomData,
        }
    }
}

// Raw values don't carry a lifetime, so only `'static` bodies can be turned into one.
impl<T: 'static> BlockRc<T> {
    /// Moves the reference held by this block into a raw value with the given tag.
    ///
    /// Fails if `tag` doesn't carry a reference count, in which case `self` is dropped.
    pub fn into_value(self, tag: ValueTag) -> Result<JsValue, ValueError> {
        if tag.is_heap_backed() {
            Ok(self.into_value_unchecked(tag as i32))
        } else {
            Err(ValueError::NotRefCounted(tag))
        }
    }

    pub(crate) fn into_value_unchecked(self, tag: i32) -> JsValue {
        JsValue::from_ptr(tag, self.into_raw().as_ptr().cast())
    }
}

impl<T: Clone> BlockRc<T> {
    /// Same as [std::rc::Rc::make_mut]: returns a mutable reference to the body, first copying
    /// it to a fresh block if this one is shared.
    pub fn make_mut(&mut self) -> &mut T {
        if self.ref_count() != 1 {
            *self = self.strong_clone();
        }

        // Safety: the block is now unique and we borrow `self` mutably.
        unsafe { &mut self.ptr.as_mut().body }
    }

    /// Returns a 1-reference counted block with the same body: `self` if it is already unique, a
    /// fresh copy otherwise.
    pub fn make_unique(self) -> Self {
        if self.ref_count() == 1 {
            self
        } else {
            self.strong_clone()
        }
    }

    /// Allocates a fresh block with a clone of the body. As opposed to [Clone::clone], which only
    /// increments the reference count, the result is 1-reference counted.
    pub fn strong_clone(&self) -> Self {
        BlockRc::new(self.get().clone())
    }
}

impl<T> Deref for BlockRc<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T> Clone for BlockRc<T> {
    fn clone(&self) -> Self {
        self.header().incr();

        BlockRc {
            ptr: self.ptr,
            _marker: PhantomData,
        }
    }
}

impl<T> Drop for BlockRc<T> {
    fn drop(&mut self) {
        // Safety: `self` owns one reference to a block allocated by `BlockRc::new`.
        unsafe { free_raw(self.header_ptr()) }
    }
}

impl<T: fmt::Debug> fmt::Debug for BlockRc<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockRc")
            .field("ref_count", &self.ref_count())
            .field("body", self.get())
            .finish()
    }
}

/// Returns a reference to the body of the block starting at `header`.
///
/// # Safety
///
/// - `header` must point to a live block allocated by [BlockRc::new] with a body of type `T`.
/// - The lifetime `'a` must not outlive the block.
/// - The body must not be mutably borrowed during `'a`.
pub unsafe fn body_from_raw<'a, T>(header: NonNull<RefCountHeader>) -> &'a T {
    &(*header.cast::<Block<T>>().as_ptr()).body
}

/// Increments the reference count of the block starting at `header`.
///
/// # Safety
///
/// `header` must point to a live block starting with a [RefCountHeader].
pub unsafe fn dup_raw(header: NonNull<RefCountHeader>) {
    header.as_ref().incr();
}

/// Decrements the reference count of the block starting at `header`, and releases the block if
/// the count drops to zero.
///
/// # Safety
///
/// `header` must point to a live block allocated by [BlockRc::new], and the caller must give up
/// one of its references.
pub unsafe fn free_raw(header: NonNull<RefCountHeader>) {
    if header.as_ref().decr() == 0 {
        let release = header.cast::<BlockPrefix>().as_ref().release;
        release(header);
    }
}

/// Creates a new reference to the pointee of `value` if it carries a reference count, and returns
/// `value`. Values without a reference count are returned unchanged.
///
/// # Safety
///
/// If `value` carries a reference count and a non-null pointer, the pointee must be a live block
/// starting with a [RefCountHeader].
pub unsafe fn dup_value(value: JsValue) -> JsValue {
    if let Some(header) = value.header() {
        dup_raw(header);
    }

    value
}

/// Gives up the reference held by `value` if it carries a reference count, releasing the pointee
/// when this was the last one. Does nothing for other values.
///
/// # Safety
///
/// If `value` carries a reference count and a non-null pointer, the pointee must be a live block
/// allocated by [BlockRc::new], and `value` must own one of its references. Copies of `value`
/// mustn't be used to access the pointee afterwards unless they own a reference of their own.
pub unsafe fn free_value(value: JsValue) {
    if let Some(header) = value.header() {
        free_raw(header);
    }
}
