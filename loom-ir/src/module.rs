//! Modules, packages and source files.

use crate::error::IrError;
use crate::node::{Content, Node, attach_all, nodes};
use crate::target::Target;
use crate::types::NamedType;
use crate::{Func, Module, Package, SrcFile};

pub(crate) struct ModuleData {
    target: Target,
    packages: Vec<Package>,
}

impl Content for ModuleData {
    fn children(&self) -> Vec<Node> {
        nodes(&self.packages)
    }

    fn duplicate(&self) -> Self {
        Self {
            target: self.target.clone(),
            packages: self.packages.iter().map(Package::duplicate).collect(),
        }
    }
}

impl Module {
    /// Create an empty module rendered for `target`.
    pub fn new(target: Target) -> Self {
        Self::from_data(ModuleData {
            target,
            packages: Vec::new(),
        })
    }

    /// The target this module is rendered for.
    pub fn target(&self) -> Target {
        self.data().target.clone()
    }

    /// Replace the target.
    pub fn set_target(&self, target: Target) {
        self.data_mut().target = target;
    }

    /// Attach and append packages in order.
    pub fn add_packages(
        self,
        packages: impl IntoIterator<Item = Package>,
    ) -> Result<Self, IrError> {
        let packages = attach_all(self.as_node(), packages)?;
        self.data_mut().packages.extend(packages);
        Ok(self)
    }

    /// The packages in declaration order.
    pub fn packages(&self) -> Vec<Package> {
        self.data().packages.clone()
    }
}

pub(crate) struct PackageData {
    import_path: String,
    name: String,
    preamble: Option<String>,
    files: Vec<SrcFile>,
}

impl Content for PackageData {
    fn children(&self) -> Vec<Node> {
        nodes(&self.files)
    }

    fn duplicate(&self) -> Self {
        Self {
            import_path: self.import_path.clone(),
            name: self.name.clone(),
            preamble: self.preamble.clone(),
            files: self.files.iter().map(SrcFile::duplicate).collect(),
        }
    }

    fn label(&self) -> Option<String> {
        Some(self.import_path.clone())
    }
}

impl Package {
    /// Create a package. The display name defaults to the last segment of
    /// the `/`-separated import path.
    pub fn new(import_path: impl Into<String>) -> Self {
        let import_path = import_path.into();
        let name = import_path
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        Self::from_data(PackageData {
            import_path,
            name,
            preamble: None,
            files: Vec::new(),
        })
    }

    /// Override the display name.
    pub fn with_name(self, name: impl Into<String>) -> Self {
        self.data_mut().name = name.into();
        self
    }

    /// Set the banner comment emitted first in every file of the package.
    pub fn with_preamble(self, preamble: impl Into<String>) -> Self {
        self.data_mut().preamble = Some(preamble.into());
        self
    }

    /// Attach and append files in order.
    pub fn add_files(self, files: impl IntoIterator<Item = SrcFile>) -> Result<Self, IrError> {
        let files = attach_all(self.as_node(), files)?;
        self.data_mut().files.extend(files);
        Ok(self)
    }

    pub fn import_path(&self) -> String {
        self.data().import_path.clone()
    }

    pub fn name(&self) -> String {
        self.data().name.clone()
    }

    pub fn preamble(&self) -> Option<String> {
        self.data().preamble.clone()
    }

    /// The files in declaration order.
    pub fn files(&self) -> Vec<SrcFile> {
        self.data().files.clone()
    }
}

pub(crate) struct SrcFileData {
    name: String,
    preamble: Option<String>,
    types: Vec<NamedType>,
    funcs: Vec<Func>,
}

impl Content for SrcFileData {
    fn children(&self) -> Vec<Node> {
        let mut children: Vec<Node> = self.types.iter().map(|t| t.as_node().clone()).collect();
        children.extend(nodes(&self.funcs));
        children
    }

    fn duplicate(&self) -> Self {
        Self {
            name: self.name.clone(),
            preamble: self.preamble.clone(),
            types: self.types.iter().map(NamedType::duplicate).collect(),
            funcs: self.funcs.iter().map(Func::duplicate).collect(),
        }
    }

    fn label(&self) -> Option<String> {
        Some(self.name.clone())
    }
}

impl SrcFile {
    /// Create a file. The name carries no extension.
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_data(SrcFileData {
            name: name.into(),
            preamble: None,
            types: Vec::new(),
            funcs: Vec::new(),
        })
    }

    /// Set the banner comment emitted first in this file.
    pub fn with_preamble(self, preamble: impl Into<String>) -> Self {
        self.data_mut().preamble = Some(preamble.into());
        self
    }

    /// Attach and append top-level types in order.
    pub fn add_types<T: Into<NamedType>>(
        self,
        types: impl IntoIterator<Item = T>,
    ) -> Result<Self, IrError> {
        let types = types.into_iter().map(Into::into).collect::<Vec<NamedType>>();
        self.as_node().attach_each(types.iter().map(NamedType::as_node))?;
        self.data_mut().types.extend(types);
        Ok(self)
    }

    /// Attach and append top-level functions in order.
    pub fn add_funcs(self, funcs: impl IntoIterator<Item = Func>) -> Result<Self, IrError> {
        let funcs = attach_all(self.as_node(), funcs)?;
        self.data_mut().funcs.extend(funcs);
        Ok(self)
    }

    pub fn name(&self) -> String {
        self.data().name.clone()
    }

    pub fn preamble(&self) -> Option<String> {
        self.data().preamble.clone()
    }

    /// Top-level types in declaration order.
    pub fn types(&self) -> Vec<NamedType> {
        self.data().types.clone()
    }

    /// Top-level functions in declaration order.
    pub fn funcs(&self) -> Vec<Func> {
        self.data().funcs.clone()
    }
}
