use std::ptr;
use libc::{c_void, c_int};

use crate::{
    ffi,
    marshal,
    handle::Window,
    utils::from_glfw_bool,
};

use super::Glfw;

// ----------------------------------------------
// OpenGL / OpenGL ES context
// ----------------------------------------------

impl Glfw {
    // None detaches the current context from this thread.
    pub fn make_context_current(&self, window: Option<Window>) {
        unsafe { ffi::glfwMakeContextCurrent(window.map_or(ptr::null_mut(), Window::as_raw)) };
    }

    pub fn current_context(&self) -> Option<Window> {
        unsafe { Window::from_raw(ffi::glfwGetCurrentContext()) }
    }

    // Screen updates to wait for before swapping buffers (0 = no vsync).
    // Needs a current context.
    pub fn swap_interval(&self, interval: i32) {
        unsafe { ffi::glfwSwapInterval(interval) };
    }

    // Needs a current context.
    pub fn extension_supported(&self, extension: &str) -> bool {
        let extension = marshal::to_c_string(extension);
        from_glfw_bool(unsafe { ffi::glfwExtensionSupported(extension.as_ptr()) })
    }

    // Address of a client API function for the current context; null if
    // unsupported. Suitable for `gl::load_with`.
    pub fn get_proc_address(&self, procname: &str) -> *const c_void {
        let procname = marshal::to_c_string(procname);
        match unsafe { ffi::glfwGetProcAddress(procname.as_ptr()) } {
            Some(function) => function as *const c_void,
            None => ptr::null(),
        }
    }
}

// ----------------------------------------------
// Vulkan
// ----------------------------------------------

impl Glfw {
    // Whether a Vulkan loader and a minimally functional ICD were found.
    pub fn vulkan_supported(&self) -> bool {
        from_glfw_bool(unsafe { ffi::glfwVulkanSupported() })
    }

    // Instance extensions needed to create window surfaces. Empty if
    // Vulkan is unavailable.
    pub fn required_instance_extensions(&self) -> Vec<String> {
        let mut count: u32 = 0;
        let names = unsafe { ffi::glfwGetRequiredInstanceExtensions(&mut count) };
        unsafe { marshal::strings_from_raw(names, count as c_int) }
    }

    // SAFETY: `instance` must be null or a live VkInstance.
    pub unsafe fn get_instance_proc_address(&self, instance: ffi::VkInstance, procname: &str) -> ffi::GLFWvkproc {
        let procname = marshal::to_c_string(procname);
        unsafe { ffi::glfwGetInstanceProcAddress(instance, procname.as_ptr()) }
    }

    // SAFETY: `instance` and `device` must be live Vulkan handles.
    pub unsafe fn physical_device_presentation_support(&self,
                                                       instance: ffi::VkInstance,
                                                       device: ffi::VkPhysicalDevice,
                                                       queue_family: u32) -> bool {
        from_glfw_bool(unsafe { ffi::glfwGetPhysicalDevicePresentationSupport(instance, device, queue_family) })
    }

    // The window must have been created with ClientApi::NoApi.
    // Err carries the VkResult.
    //
    // SAFETY: `instance` must be a live VkInstance and `allocator` null or
    // valid for the duration of the call.
    pub unsafe fn create_window_surface(&self,
                                        instance: ffi::VkInstance,
                                        window: Window,
                                        allocator: *const ffi::VkAllocationCallbacks) -> Result<ffi::VkSurfaceKHR, ffi::VkResult> {
        let mut surface: ffi::VkSurfaceKHR = 0;
        let result = unsafe { ffi::glfwCreateWindowSurface(instance, window.as_raw(), allocator, &mut surface) };
        if result == 0 { Ok(surface) } else { Err(result) }
    }
}
