// File: crates/cellplot-window/src/lib.rs
// Summary: Shows rendered charts in a window via RGBA blit (CPU) using winit + softbuffer.
// Keys: Right/Space next chart, Left previous, Escape closes.

use std::num::NonZeroU32;

use anyhow::{anyhow, Context, Result};
use cellplot_core::RenderedChart;
use log::debug;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::platform::run_return::EventLoopExtRunReturn;
use winit::window::{Window, WindowBuilder};

/// Take ownership of `charts` and show them one at a time until the window closes.
/// Returns immediately for an empty list.
pub fn show(mut charts: Vec<RenderedChart>) -> Result<()> {
    if charts.is_empty() {
        return Ok(());
    }

    let mut event_loop = EventLoop::new();
    let (w0, h0) = charts[0].size();
    let window = WindowBuilder::new()
        .with_title(window_title(&charts, 0))
        .with_inner_size(LogicalSize::new(w0 as f64, h0 as f64))
        .build(&event_loop)
        .context("build window")?;

    let context = unsafe { softbuffer::Context::new(&window) }.map_err(|e| anyhow!("softbuffer context: {e}"))?;
    let mut surface =
        unsafe { softbuffer::Surface::new(&context, &window) }.map_err(|e| anyhow!("softbuffer surface: {e}"))?;

    let mut idx = 0usize;
    let mut failure: Option<anyhow::Error> = None;

    event_loop.run_return(|event, _, cf| {
        *cf = ControlFlow::Wait;
        match event {
            Event::WindowEvent { event, window_id: _ } => match event {
                WindowEvent::CloseRequested => *cf = ControlFlow::Exit,
                WindowEvent::Resized(_) => window.request_redraw(),
                WindowEvent::KeyboardInput {
                    input: KeyboardInput { state: ElementState::Pressed, virtual_keycode: Some(key), .. },
                    ..
                } => {
                    let next = match key {
                        VirtualKeyCode::Escape => {
                            *cf = ControlFlow::Exit;
                            return;
                        }
                        VirtualKeyCode::Right | VirtualKeyCode::Space => step(idx, charts.len(), 1),
                        VirtualKeyCode::Left => step(idx, charts.len(), -1),
                        _ => return,
                    };
                    if next != idx {
                        idx = next;
                        switch_to(&window, &charts, idx);
                    }
                }
                _ => {}
            },
            Event::RedrawRequested(_) => {
                if let Err(e) = present(&mut surface, window.inner_size(), &mut charts[idx]) {
                    failure = Some(e);
                    *cf = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    });

    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn switch_to(window: &Window, charts: &[RenderedChart], idx: usize) {
    debug!("showing chart {}/{}", idx + 1, charts.len());
    window.set_title(&window_title(charts, idx));
    window.request_redraw();
}

fn window_title(charts: &[RenderedChart], idx: usize) -> String {
    let name = charts[idx].title().unwrap_or("chart");
    if charts.len() > 1 {
        format!("cellplot: {name} ({}/{})", idx + 1, charts.len())
    } else {
        format!("cellplot: {name}")
    }
}

/// Wrapping index step over `len` charts.
fn step(idx: usize, len: usize, delta: isize) -> usize {
    if len == 0 {
        return 0;
    }
    (idx as isize + delta).rem_euclid(len as isize) as usize
}

fn present(surface: &mut softbuffer::Surface, size: PhysicalSize<u32>, chart: &mut RenderedChart) -> Result<()> {
    let (w, h) = (size.width.max(1), size.height.max(1));
    let (nw, nh) = (NonZeroU32::new(w).context("zero width")?, NonZeroU32::new(h).context("zero height")?);
    surface.resize(nw, nh).map_err(|e| anyhow!("resize surface: {e}"))?;

    chart.set_size(w as i32, h as i32);
    let (rgba, _, _, _) = chart.to_rgba8()?;

    let mut frame = surface.buffer_mut().map_err(|e| anyhow!("frame buffer: {e}"))?;
    for (dst, px) in frame.iter_mut().zip(rgba.chunks_exact(4)) {
        *dst = pack_rgb(px);
    }
    frame.present().map_err(|e| anyhow!("present: {e}"))?;
    Ok(())
}

/// softbuffer pixel: 0x00RRGGBB.
fn pack_rgb(px: &[u8]) -> u32 {
    ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_wraps_both_ways() {
        assert_eq!(step(0, 3, 1), 1);
        assert_eq!(step(2, 3, 1), 0);
        assert_eq!(step(0, 3, -1), 2);
        assert_eq!(step(0, 1, 1), 0);
    }

    #[test]
    fn packs_rgba_into_xrgb() {
        assert_eq!(pack_rgb(&[0x1f, 0x77, 0xb4, 0xff]), 0x001f_77b4);
    }

    #[test]
    fn empty_list_returns_without_window() {
        assert!(show(Vec::new()).is_ok());
    }
}
