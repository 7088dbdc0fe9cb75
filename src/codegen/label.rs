/// Hands out label ids for IF and WHILE constructs.
///
/// Each kind has its own counter. Ids start at 1 and only ever grow, so one
/// allocator shared by several compilations never produces the same label
/// twice. The allocator belongs to the caller; independent compilations use
/// independent allocators.
#[derive(Debug, Default, Clone)]
pub struct LabelAllocator {
    if_count: usize,
    while_count: usize,
}

impl LabelAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_if(&mut self) -> usize {
        self.if_count += 1;
        self.if_count
    }

    pub fn next_while(&mut self) -> usize {
        self.while_count += 1;
        self.while_count
    }
}
