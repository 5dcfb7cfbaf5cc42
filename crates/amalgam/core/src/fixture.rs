//! The reference include tree used by `amalgam self-test` and the tests.
//!
//! `a.cpp` pulls in two quoted headers, one of which chains down to an
//! angle-bracket include found in the first search directory, while the
//! other reaches the second search directory through a quoted fallback.
//! Its last include (`dummy.txt`) exists nowhere, so expanding the tree
//! fails at `a.cpp` line 8 after writing [`EXPECTED_PARTIAL_OUTPUT`].

use crate::search_path::SearchPath;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Entry file, relative to the fixture root.
pub const ENTRY: &str = "a.cpp";

/// Search directories, relative to the fixture root, in lookup order.
pub const SEARCH_DIRS: [&str; 2] = ["include1", "include2"];

/// The include that cannot be resolved, and the line of `a.cpp` holding it.
pub const MISSING_INCLUDE: &str = "dummy.txt";
pub const MISSING_INCLUDE_LINE: usize = 8;

pub const FILES: &[(&str, &str)] = &[
    (
        "a.cpp",
        "// this comment before include\n\
         #include \"dir1/b.h\"\n\
         // text between b.h and c.h\n\
         #include \"dir1/d.h\"\n\
         \n\
         void SayHello() {\n\
         \x20   std::cout << \"hello, world!\" << std::endl;\n\
         #   include<dummy.txt>\n\
         }\n",
    ),
    (
        "dir1/b.h",
        "// text from b.h before include\n\
         #include \"subdir/c.h\"\n\
         // text from b.h after include",
    ),
    (
        "dir1/subdir/c.h",
        "// text from c.h before include\n\
         #include <std1.h>\n\
         // text from c.h after include\n",
    ),
    (
        "dir1/d.h",
        "// text from d.h before include\n\
         #include \"lib/std2.h\"\n\
         // text from d.h after include\n",
    ),
    ("include1/std1.h", "// std1\n"),
    ("include2/lib/std2.h", "// std2\n"),
];

/// Everything written before the unresolved `dummy.txt` include aborts.
pub const EXPECTED_PARTIAL_OUTPUT: &str = "// this comment before include\n\
// text from b.h before include\n\
// text from c.h before include\n\
// std1\n\
// text from c.h after include\n\
// text from b.h after include\n\
// text between b.h and c.h\n\
// text from d.h before include\n\
// std2\n\
// text from d.h after include\n\
\n\
void SayHello() {\n\
\x20   std::cout << \"hello, world!\" << std::endl;\n";

/// Paths of a fixture tree written to disk.
#[derive(Debug, Clone)]
pub struct FixtureTree {
    pub root: PathBuf,
    pub entry: PathBuf,
    pub search_path: SearchPath,
}

/// Write the fixture tree under `root`, replacing any files of the same name.
pub fn write_fixture_tree(root: &Path) -> io::Result<FixtureTree> {
    for (rel, content) in FILES {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
    }
    for dir in SEARCH_DIRS {
        fs::create_dir_all(root.join(dir))?;
    }

    Ok(FixtureTree {
        root: root.to_path_buf(),
        entry: root.join(ENTRY),
        search_path: SEARCH_DIRS.iter().map(|d| root.join(d)).collect(),
    })
}
