//! Folder/file tree projected from a flat list of generated files.

use std::collections::HashMap;

use apigen_core::GeneratedFile;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

/// A node of the preview tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileTreeNode {
    pub id: String,
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileTreeNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl FileTreeNode {
    fn folder(path: &str, name: &str) -> Self {
        Self {
            id: path.to_string(),
            name: name.to_string(),
            path: path.to_string(),
            kind: NodeKind::Folder,
            children: Some(Vec::new()),
            content: None,
        }
    }

    fn file(file: &GeneratedFile, name: &str) -> Self {
        Self {
            id: file.path.clone(),
            name: name.to_string(),
            path: file.path.clone(),
            kind: NodeKind::File,
            children: None,
            content: Some(file.content.clone()),
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    /// Number of file nodes at or below this node.
    pub fn file_count(&self) -> usize {
        match &self.children {
            Some(children) => children.iter().map(FileTreeNode::file_count).sum(),
            None => 1,
        }
    }
}

/// Build the preview forest.
///
/// Folders are shared by cumulative path, and children keep the order in
/// which they were first encountered.
pub fn build_tree(files: &[GeneratedFile]) -> Vec<FileTreeNode> {
    // Folder paths map to an index chain from the root down to the folder.
    let mut folders: HashMap<String, Vec<usize>> = HashMap::new();
    let mut roots: Vec<FileTreeNode> = Vec::new();

    for file in files {
        let parts: Vec<&str> = file.path.split('/').filter(|p| !p.is_empty()).collect();
        let Some((name, dirs)) = parts.split_last() else {
            continue;
        };

        let mut chain: Vec<usize> = Vec::new();
        let mut current = String::new();
        for dir in dirs {
            if !current.is_empty() {
                current.push('/');
            }
            current.push_str(dir);

            if let Some(existing) = folders.get(&current) {
                chain = existing.clone();
                continue;
            }

            let siblings = children_at(&mut roots, &chain);
            siblings.push(FileTreeNode::folder(&current, dir));
            chain.push(siblings.len() - 1);
            folders.insert(current.clone(), chain.clone());
        }

        children_at(&mut roots, &chain).push(FileTreeNode::file(file, name));
    }

    roots
}

fn children_at<'a>(roots: &'a mut Vec<FileTreeNode>, chain: &[usize]) -> &'a mut Vec<FileTreeNode> {
    let mut level = roots;
    for &index in chain {
        level = level[index].children.get_or_insert_with(Vec::new);
    }
    level
}
