//! Render-time diagnostics, in the same `eprintln!`-gated, flag-controlled
//! style used elsewhere in this crate family for step-by-step tracing.

/// A cheap, flag-gated tracer for tag dispatch during a render.
#[derive(Debug, Clone, Copy)]
pub struct RenderTrace {
    enabled: bool,
}

impl RenderTrace {
    pub fn new(enabled: bool) -> Self {
        RenderTrace { enabled }
    }

    pub fn session_start(&self, template_len: usize) {
        if !self.enabled {
            return;
        }
        eprintln!("DEBUG: ═══════════════════════════════════════════════");
        eprintln!("DEBUG: RENDER START (template_len={template_len})");
    }

    pub fn session_end(&self, outcome: &Result<(), crate::error::Error>) {
        if !self.enabled {
            return;
        }
        match outcome {
            Ok(()) => eprintln!("DEBUG: ✅ RENDER COMPLETE"),
            Err(e) => eprintln!("DEBUG: ❌ RENDER FAILED: {e}"),
        }
        eprintln!("DEBUG: ═══════════════════════════════════════════════");
    }

    pub fn literal(&self, text: &str) {
        if !self.enabled || text.is_empty() {
            return;
        }
        eprintln!("DEBUG: literal({len} bytes)", len = text.len());
    }

    pub fn tag(&self, sigil: char, name: &str) {
        if !self.enabled {
            return;
        }
        eprintln!("DEBUG: tag {sigil:?} name={name:?}");
    }

    pub fn section_enter(&self, name: &str, inverted: bool, entered: bool) {
        if !self.enabled {
            return;
        }
        eprintln!(
            "DEBUG: section {name:?} inverted={inverted} -> entered={entered}"
        );
    }

    pub fn section_next(&self, name: &str, again: bool) {
        if !self.enabled {
            return;
        }
        eprintln!("DEBUG: section {name:?} next -> {again}");
    }

    pub fn partial(&self, name: &str, source: &str) {
        if !self.enabled {
            return;
        }
        eprintln!("DEBUG: 🎯 partial {name:?} via {source}");
    }
}
