/// Document-wide parsing policy, fixed when the document is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// `true`: the first occurrence of a key in a section wins and repeats are dropped.
    /// `false`: repeats with a different value are kept under a disambiguated lookup name.
    pub restrict_duplicates: bool,
    /// `true`: options before the first header go into a single hidden section that is
    /// written back without a header. `false`: such options abort parsing.
    pub allow_headerless_section: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            restrict_duplicates: true,
            allow_headerless_section: false,
        }
    }
}

impl ParserOptions {
    pub fn restrict_duplicates(mut self, restrict: bool) -> Self {
        self.restrict_duplicates = restrict;
        self
    }

    pub fn allow_headerless_section(mut self, allow: bool) -> Self {
        self.allow_headerless_section = allow;
        self
    }
}
