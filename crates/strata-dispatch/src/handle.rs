//! Dispatchable objects and trampoline routing.
//!
//! Device-scope calls arrive through a single globally-known implementation
//! that does not know which variant the target device was created against.
//! That implementation inspects its first argument -- always one of the
//! handle kinds below -- walks to the owning device, and forwards through
//! the dispatch table that device snapshotted at creation time. The
//! snapshot is written exactly once, by the creating thread, before the
//! device is shared; afterwards it is read-only.

use std::sync::Arc;

use strata_registry::{ApiVersion, ExtensionSet};

use crate::layout::{DispatchLayout, Variant};
use crate::table::EntryFn;

/// The implementation-wide context object.
///
/// Carries the negotiated core version and the instance extensions the
/// caller enabled; both feed gate evaluation.
#[derive(Debug)]
pub struct Instance {
    api_version: ApiVersion,
    extensions: ExtensionSet,
}

impl Instance {
    pub fn new(api_version: ApiVersion, extensions: ExtensionSet) -> Self {
        Self { api_version, extensions }
    }

    pub fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    pub fn extensions(&self) -> &ExtensionSet {
        &self.extensions
    }
}

/// A created device, bound to one variant for life.
#[derive(Debug)]
pub struct Device {
    variant: Variant,
    extensions: ExtensionSet,
    /// Private dispatch table: every device-scope slot resolved against
    /// this device's variant, captured at creation. One allocation, never
    /// written again.
    dispatch: Box<[Option<EntryFn>]>,
}

impl Device {
    /// Create a device against a variant, resolving its entire dispatch
    /// table up front.
    ///
    /// # Panics
    ///
    /// Panics if `variant` is outside the layout's variant universe.
    pub fn new(layout: &DispatchLayout, variant: Variant, extensions: ExtensionSet) -> Self {
        let dispatch = (0..layout.device_len() as u32)
            .map(|index| layout.resolve_device(index, variant))
            .collect();
        Self { variant, extensions, dispatch }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn extensions(&self) -> &ExtensionSet {
        &self.extensions
    }

    /// The implementation this device resolved for a dense index, if any.
    pub fn entrypoint(&self, index: u32) -> Option<EntryFn> {
        self.dispatch[index as usize]
    }
}

/// A queue created from a device. Routes through its owning device.
#[derive(Debug)]
pub struct Queue {
    device: Arc<Device>,
}

impl Queue {
    pub fn new(device: Arc<Device>) -> Self {
        Self { device }
    }

    pub fn device(&self) -> &Device {
        &self.device
    }
}

/// A command buffer recorded against a device. Routes through its owning
/// device.
#[derive(Debug)]
pub struct CommandBuffer {
    device: Arc<Device>,
}

impl CommandBuffer {
    pub fn new(device: Arc<Device>) -> Self {
        Self { device }
    }

    pub fn device(&self) -> &Device {
        &self.device
    }
}

/// The first argument of every entry-point call.
///
/// A closed enumeration of the dispatchable object kinds; each device-scope
/// kind knows how to reach its owning device.
#[derive(Debug, Clone, Copy)]
pub enum Handle<'a> {
    Instance(&'a Instance),
    Device(&'a Device),
    Queue(&'a Queue),
    CommandBuffer(&'a CommandBuffer),
}

impl<'a> Handle<'a> {
    /// The device that owns this handle.
    ///
    /// # Panics
    ///
    /// Panics on an instance-scope handle. The catalog guarantees every
    /// device-scope entry point takes a device-kind first argument, so
    /// reaching this case means the catalog and the dispatch layout are out
    /// of sync -- misrouting the call would be worse than aborting.
    pub fn owning_device(self) -> &'a Device {
        match self {
            Handle::Device(device) => device,
            Handle::Queue(queue) => &queue.device,
            Handle::CommandBuffer(cb) => &cb.device,
            Handle::Instance(_) => {
                panic!("instance-scope handle in device-scope dispatch")
            }
        }
    }
}

/// The generic device-scope forwarding step: walk from the call's first
/// argument to the owning device and pick the implementation that device
/// resolved for this dense index at creation time.
pub fn route_device_call(handle: Handle<'_>, index: u32) -> Option<EntryFn> {
    handle.owning_device().entrypoint(index)
}
