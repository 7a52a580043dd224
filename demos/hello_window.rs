use std::cell::Cell;
use std::rc::Rc;

use glfw_binding::{
    log,
    Action,
    Glfw,
    Hint,
    Key,
    OpenGlProfile,
    WindowConfig,
};

// ----------------------------------------------
// main()
// ----------------------------------------------

fn main() {
    log::set_level(log::Level::Verbose);

    let glfw = match Glfw::init() {
        Ok(glfw) => glfw,
        Err(err) => {
            log::error!(log::channel!("demo"), "Failed to initialize GLFW: {err}");
            return;
        }
    };

    glfw.set_error_callback(Some(glfw_binding::log_errors()));

    let mut config = WindowConfig::default();
    config.title = "Hello Window".into();
    config.width = 800;
    config.height = 600;
    config.hints.context_version_major = 3;
    config.hints.context_version_minor = 3;
    config.hints.opengl_forward_compat = true;
    config.hints.opengl_profile = OpenGlProfile::Core;

    let Some(window) = config.create_window(&glfw) else {
        return;
    };

    glfw.make_context_current(Some(window));
    glfw.swap_interval(1);
    gl::load_with(|symbol| glfw.get_proc_address(symbol));

    log::info!(log::channel!("demo"), "OpenGL context version: {}.{}",
               window.attrib(Hint::ContextVersionMajor),
               window.attrib(Hint::ContextVersionMinor));

    // Cleared color flips to red while the space bar is held.
    let highlight = Rc::new(Cell::new(false));

    let key_highlight = highlight.clone();
    glfw.set_key_callback(window, Some(Box::new(move |window, key, _scancode, action, _mods| {
        match (key, action) {
            (Key::Escape, Action::Press) => window.set_should_close(true),
            (Key::Space, _) => key_highlight.set(action.is_down()),
            _ => {}
        }
    })));

    glfw.set_framebuffer_size_callback(window, Some(Box::new(|_, width, height| {
        unsafe { gl::Viewport(0, 0, width, height) };
    })));

    glfw.set_drop_callback(window, Some(Box::new(|_, paths| {
        for path in &paths {
            log::info!(log::channel!("demo"), "Dropped: {}", path.display());
        }
    })));

    while !window.should_close() {
        let (red, green, blue) = if highlight.get() { (0.8, 0.1, 0.1) } else { (0.1, 0.2, 0.3) };
        unsafe {
            gl::ClearColor(red, green, blue, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }

        window.swap_buffers();
        glfw.poll_events();
    }

    glfw.destroy_window(window);
    glfw.terminate();
}
