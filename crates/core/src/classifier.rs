//! Static authorization policy for script verbs.

/// Verb → requires an authenticated session.
///
/// Verbs missing from the table do not require a session.
pub const AUTH_POLICY: &[(&str, bool)] = &[
	// users and groups
	("mkgrp", true),
	("rmgrp", true),
	("mkusr", true),
	("rmusr", true),
	("chgrp", false),
	// files and directories
	("mkdir", true),
	("mkfile", true),
	("remove", true),
	("edit", true),
	("rename", true),
	("copy", true),
	("move", true),
	("find", true),
	("chown", true),
	("chmod", true),
	("cat", true),
	// journal recovery
	("recovery", true),
	("loss", true),
	// disks, partitions, mounting and session
	("mkdisk", false),
	("rmdisk", false),
	("fdisk", false),
	("mount", false),
	("unmount", false),
	("mounted", false),
	("mkfs", false),
	("rep", false),
	("login", false),
	("logout", false),
];

/// Lower-cased first whitespace-delimited token of `line`.
pub fn verb(line: &str) -> String {
	line.split_whitespace().next().unwrap_or_default().to_lowercase()
}

/// Whether running `line` needs someone logged in.
pub fn requires_auth(line: &str) -> bool {
	let verb = verb(line);
	AUTH_POLICY.iter().any(|(name, protected)| *protected && *name == verb)
}

pub fn is_login(line: &str) -> bool {
	verb(line) == "login"
}

pub fn is_logout(line: &str) -> bool {
	verb(line) == "logout"
}
