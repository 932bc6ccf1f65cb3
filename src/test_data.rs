#[cfg(test)]
pub const POST_DATA_MD: &str = "---
title: Building an AWS Landing Zone
description: How we structured accounts, guardrails and networking for a multi-team AWS organization.
pubDatetime: 2025-01-15T10:00:00Z
modDatetime: 2025-02-01T08:30:00Z
tags:
  - AWS
  - \"Cloud Architecture\"
draft: false
---

A landing zone is the foundation every workload account is built on.

![Account layout](/assets/landing-zone.png)

## What is a landing zone?

A pre-configured, secure, multi-account AWS environment.

- Organizations
- Control Tower

## How long does it take?

About two weeks for the baseline.

## Lessons learned

Start small.

![Second diagram](/assets/guardrails.png)
";

#[cfg(test)]
pub const DRAFT_POST_MD: &str = "---
title: Work in progress
description: Notes that are not ready to be published yet, kept here while they mature.
pubDatetime: 2025-03-01T09:00:00Z
tags: [Notes]
draft: true
---
Nothing to see.
";

#[cfg(test)]
pub const ORACLE_POST_MD: &str = "---
title: Migrating Oracle workloads to the cloud
description: A practical checklist for moving Oracle databases with minimal downtime and no surprises.
author: Jane Doe
pubDatetime: 2024-11-20 14:00:00 +01:00
tags: [Oracle, aws]
---
Start with an inventory.
";

#[cfg(test)]
pub fn make_post(id: &str, tags: &[&str]) -> crate::content::Post {
    use chrono::{TimeZone, Utc};
    use std::path::PathBuf;

    use crate::content::{Post, PostHeader, PostId};

    Post {
        header: PostHeader {
            file_name: PathBuf::from(format!("{}.md", id)),
            id: PostId(id.to_string()),
            pub_datetime: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            mod_datetime: None,
            author: "Test Author".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            draft: false,
            featured: false,
            canonical_url: None,
            og_image: None,
            timezone: None,
        },
        title: format!("Post {}", id),
        description: format!("Description of post {}", id),
        body: format!("Body of {}.\n", id),
    }
}

/// Writes `files` (relative path, content) below `dir`, creating parents.
#[cfg(test)]
pub fn write_files(dir: &std::path::Path, files: &[(&str, &str)]) {
    for (name, content) in files {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }
}
