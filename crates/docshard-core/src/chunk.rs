//! Token-budgeted packing of rendered blocks into chunks
//!
//! The planner is pure: it consumes rendered blocks for one tag and
//! produces finished chunk bodies, leaving all file I/O to the caller.
//! A chunk is flushed once appending the next block would exceed the
//! token budget and the chunk already holds the minimum operation count;
//! a block that alone exceeds the budget always starts its own chunk and
//! is never split.

use crate::text::estimate_tokens;

/// Packing limits for one run
#[derive(Debug, Clone, Copy)]
pub struct ChunkLimits {
    /// Approximate token ceiling per chunk file
    pub token_budget: usize,
    /// Operations a chunk must hold before a budget-triggered flush
    pub min_ops_per_chunk: usize,
}

impl Default for ChunkLimits {
    fn default() -> Self {
        Self {
            token_budget: 1500,
            min_ops_per_chunk: 1,
        }
    }
}

/// A finished chunk ready to be written
#[derive(Debug, Clone)]
pub struct Chunk {
    /// 1-based index within the tag
    pub index: usize,
    pub body: String,
    pub operations: usize,
    pub estimated_tokens: usize,
}

/// Accumulates rendered blocks into budget-bounded chunks for one tag
#[derive(Debug)]
pub struct ChunkPlanner {
    title_line: String,
    limits: ChunkLimits,
    estimator: fn(&str) -> usize,
    completed: Vec<Chunk>,
    body: String,
    operations: usize,
    tokens: usize,
}

impl ChunkPlanner {
    /// Planner with the default `ceil(chars / 4)` token estimator
    pub fn new(tag: &str, limits: ChunkLimits) -> Self {
        Self::with_estimator(tag, limits, estimate_tokens)
    }

    /// Planner with a custom token estimator
    pub fn with_estimator(tag: &str, limits: ChunkLimits, estimator: fn(&str) -> usize) -> Self {
        let title_line = format!("# {tag}\n\n");
        let tokens = estimator(&title_line);
        Self {
            body: title_line.clone(),
            title_line,
            limits,
            estimator,
            completed: Vec::new(),
            operations: 0,
            tokens,
        }
    }

    /// Append one rendered block, flushing first when the rules call for it
    ///
    /// Returns the 1-based index of the chunk the block landed in, which
    /// is what the manifest records for the operation.
    pub fn push(&mut self, block: &str) -> usize {
        let block_tokens = (self.estimator)(block);

        if self.tokens + block_tokens > self.limits.token_budget
            && self.operations >= self.limits.min_ops_per_chunk
        {
            self.flush();
        }
        // An oversized block evicts whatever is buffered, even below the
        // minimum operation floor, so it starts its own chunk.
        if block_tokens > self.limits.token_budget && self.operations > 0 {
            self.flush();
        }

        self.body.push_str(block);
        self.operations += 1;
        self.tokens += block_tokens;
        self.completed.len() + 1
    }

    /// Close the trailing chunk and return all chunks in order
    pub fn finish(mut self) -> Vec<Chunk> {
        self.flush();
        self.completed
    }

    fn flush(&mut self) {
        if self.operations == 0 {
            return;
        }
        let index = self.completed.len() + 1;
        let body = std::mem::replace(&mut self.body, self.title_line.clone());
        self.completed.push(Chunk {
            index,
            body,
            operations: self.operations,
            estimated_tokens: self.tokens,
        });
        self.operations = 0;
        self.tokens = (self.estimator)(&self.title_line);
    }
}
