use crate::declaration::SynthesizedType;
use crate::fragments::FragmentRegistry;
use crate::names::NameAllocator;
use crate::options::CodegenOptions;
use crate::schema::SchemaView;

/// State owned by one synthesis run.
///
/// The allocator and the declaration list are the only mutable parts; both
/// are dropped with the run, so concurrent runs never share names.
pub(crate) struct SynthesisContext<'a> {
    pub schema: SchemaView<'a>,
    pub options: &'a CodegenOptions,
    pub fragments: &'a FragmentRegistry<'a>,
    pub names: NameAllocator,
    declarations: Vec<SynthesizedType>,
}

impl<'a> SynthesisContext<'a> {
    pub fn new(
        schema: SchemaView<'a>,
        options: &'a CodegenOptions,
        fragments: &'a FragmentRegistry<'a>,
        names: NameAllocator,
    ) -> Self {
        Self {
            schema,
            options,
            fragments,
            names,
            declarations: Vec::new(),
        }
    }

    pub fn push(&mut self, declaration: SynthesizedType) {
        tracing::trace!(name = %declaration.name, kind = ?declaration.kind, "Pushed declaration");
        self.declarations.push(declaration);
    }

    pub fn into_declarations(self) -> Vec<SynthesizedType> {
        self.declarations
    }
}
