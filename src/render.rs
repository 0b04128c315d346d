use crate::dom;
use std::f64::consts::TAU;
use viz_core::{
    DrawCommand, Fill, ResizeAdapter, ResizeError, Stroke, Surface, SurfaceError, ViewportGeometry,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// 2D canvas backend for the core draw lists.
///
/// Drawing happens in CSS pixels; the context transform carries the
/// device-pixel-ratio scale set by [`CanvasSurface::sync_backing_size`].
pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    adapter: ResizeAdapter,
}

impl CanvasSurface {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("getContext(2d) failed: {:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("canvas has no 2d context"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|_| anyhow::anyhow!("2d context has an unexpected type"))?;
        Ok(Self {
            canvas,
            ctx,
            adapter: ResizeAdapter::new(),
        })
    }

    /// Match the backing store to layout size times DPR. A detached or
    /// collapsed canvas keeps its previous size.
    pub fn sync_backing_size(&mut self) -> Result<(), ResizeError> {
        let layout = dom::layout_box(&self.canvas);
        let dpr = dom::device_pixel_ratio();
        let backing = self.adapter.resize(layout, dpr)?;
        if self.canvas.width() != backing.width {
            self.canvas.set_width(backing.width);
        }
        if self.canvas.height() != backing.height {
            self.canvas.set_height(backing.height);
        }
        // resizing resets the context state, so always reapply the scale
        let scale = self.adapter.geometry().dpr as f64;
        _ = self.ctx.set_transform(scale, 0.0, 0.0, scale, 0.0, 0.0);
        log::debug!(
            "[render] backing {}x{} dpr={:.2}",
            backing.width,
            backing.height,
            scale
        );
        Ok(())
    }

    fn apply_stroke(&self, stroke: &Stroke) {
        self.ctx.set_stroke_style_str(&stroke.color.to_css());
        self.ctx.set_line_width(stroke.width as f64);
        self.ctx.set_line_cap(stroke.cap.as_str());
    }

    fn draw(&self, cmd: &DrawCommand) -> Result<(), (&'static str, JsValue)> {
        let ctx = &self.ctx;
        match cmd {
            DrawCommand::FillCircle { center, radius, fill } => {
                let (x, y, r) = (center.x as f64, center.y as f64, *radius as f64);
                match fill {
                    Fill::Solid(color) => ctx.set_fill_style_str(&color.to_css()),
                    Fill::Radial { inner, outer } => {
                        let gradient = ctx
                            .create_radial_gradient(x, y, 0.0, x, y, r)
                            .map_err(|e| ("createRadialGradient", e))?;
                        gradient
                            .add_color_stop(0.0, &inner.to_css())
                            .map_err(|e| ("addColorStop", e))?;
                        gradient
                            .add_color_stop(1.0, &outer.to_css())
                            .map_err(|e| ("addColorStop", e))?;
                        ctx.set_fill_style_canvas_gradient(&gradient);
                    }
                }
                ctx.begin_path();
                ctx.arc(x, y, r, 0.0, TAU).map_err(|e| ("arc", e))?;
                ctx.fill();
            }
            DrawCommand::StrokeCircle { center, radius, stroke } => {
                self.apply_stroke(stroke);
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)
                    .map_err(|e| ("arc", e))?;
                ctx.stroke();
            }
            DrawCommand::Line { from, to, stroke } => {
                self.apply_stroke(stroke);
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.stroke();
            }
            DrawCommand::Polyline { points, stroke } => {
                let Some((first, rest)) = points.split_first() else {
                    return Ok(());
                };
                self.apply_stroke(stroke);
                ctx.begin_path();
                ctx.move_to(first.x as f64, first.y as f64);
                for p in rest {
                    ctx.line_to(p.x as f64, p.y as f64);
                }
                ctx.stroke();
            }
        }
        Ok(())
    }
}

impl Surface for CanvasSurface {
    fn geometry(&self) -> ViewportGeometry {
        self.adapter.geometry()
    }

    fn refresh(&mut self) {
        _ = self.sync_backing_size();
    }

    fn clear(&mut self) {
        let g = self.adapter.geometry();
        self.ctx.clear_rect(0.0, 0.0, g.width as f64, g.height as f64);
    }

    fn execute(&mut self, commands: &[DrawCommand]) -> Result<(), SurfaceError> {
        if !self.canvas.is_connected() {
            return Err(SurfaceError::ContextLost);
        }
        for cmd in commands {
            self.draw(cmd).map_err(|(op, e)| SurfaceError::Backend {
                op,
                detail: format!("{:?}", e),
            })?;
        }
        Ok(())
    }
}
