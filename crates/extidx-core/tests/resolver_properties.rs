use extidx_core::resolver::{apply_filters, filter_chain, mirror_download_url, rank, select};
use extidx_core::{CandidateFilter, Host};
use extidx_meta::{Candidate, ExtVersion};
use extidx_test_utils::CandidateBuilder;
use proptest::prelude::*;

fn host() -> Host {
    Host::new(ExtVersion::parse("2.60.0").unwrap())
}

fn arb_version() -> impl Strategy<Value = String> {
    (0u64..5, 0u64..5, 0u64..5).prop_map(|(a, b, c)| format!("{a}.{b}.{c}"))
}

fn arb_candidate() -> impl Strategy<Value = Candidate> {
    let tags = prop::sample::select(vec![
        ("py3", "none", "any"),
        ("py2.py3", "none", "any"),
        ("cp311", "cp311", "win_amd64"),
        ("cp39", "abi3", "manylinux2014_x86_64"),
        ("py3", "none", "macosx_11_0_arm64"),
    ]);
    (arb_version(), tags).prop_map(|(version, (py, abi, plat))| {
        CandidateBuilder::new("ext", &version)
            .platform(py, abi, plat)
            .build()
    })
}

proptest! {
    #[test]
    fn test_universal_filter_drops_platform_tags(candidates in prop::collection::vec(arb_candidate(), 0..12)) {
        let host = host();
        let kept = apply_filters(candidates.iter().collect(), &[CandidateFilter::Universal], &host).unwrap();
        for candidate in kept {
            let info = candidate.wheel_info().unwrap();
            prop_assert_eq!(info.abi_tag.as_str(), "none");
            prop_assert_eq!(info.platform_tag.as_str(), "any");
        }
    }

    #[test]
    fn test_floor_keeps_only_newer(
        candidates in prop::collection::vec(arb_candidate(), 0..12),
        current in arb_version(),
    ) {
        let host = host();
        let floor = ExtVersion::parse(&current).unwrap();
        let filters = filter_chain(Some(current.as_str()), None).unwrap();
        let kept = apply_filters(candidates.iter().collect(), &filters, &host).unwrap();
        for candidate in kept {
            prop_assert!(candidate.parsed_version().unwrap() > floor);
        }
    }

    #[test]
    fn test_no_floor_without_current_version(candidates in prop::collection::vec(arb_candidate(), 0..12)) {
        let host = host();
        let universal = apply_filters(candidates.iter().collect(), &[CandidateFilter::Universal], &host).unwrap();
        let filters = filter_chain(None, None).unwrap();
        let kept = apply_filters(candidates.iter().collect(), &filters, &host).unwrap();
        prop_assert_eq!(kept.len(), universal.len());
    }

    #[test]
    fn test_rank_is_descending_and_stable(candidates in prop::collection::vec(arb_candidate(), 0..12)) {
        let ranked = rank(candidates.iter().collect()).unwrap();
        prop_assert_eq!(ranked.len(), candidates.len());

        let position = |c: &Candidate| candidates.iter().position(|x| std::ptr::eq(x, c)).unwrap();
        for pair in ranked.windows(2) {
            let (a, b) = (pair[0].parsed_version().unwrap(), pair[1].parsed_version().unwrap());
            prop_assert!(a >= b);
            if a == b {
                prop_assert!(position(pair[0]) < position(pair[1]));
            }
        }
    }

    #[test]
    fn test_target_selection_matches_text(
        candidates in prop::collection::vec(arb_candidate(), 1..12),
        target in arb_version(),
    ) {
        let ranked = rank(candidates.iter().collect()).unwrap();
        match select(&ranked, Some(target.as_str())) {
            Ok(chosen) => prop_assert_eq!(&chosen.metadata.version, &target),
            Err(err) => {
                prop_assert!(err.is_no_candidates());
                prop_assert!(candidates.iter().all(|c| c.metadata.version != target));
            }
        }
    }

    #[test]
    fn test_mirror_url_uses_basename(
        dirs in prop::collection::vec("[a-z0-9-]{1,8}", 0..4),
        artifact in "[a-z_]{1,8}-[0-9]\\.[0-9]\\.[0-9]-py3-none-any\\.whl",
        endpoint in "https://[a-z]{1,8}\\.internal(/[a-z]{1,6})?/?",
    ) {
        let mut url = String::from("https://public.blob");
        for dir in &dirs {
            url.push('/');
            url.push_str(dir);
        }
        url.push('/');
        url.push_str(&artifact);

        let mirrored = mirror_download_url(&url, &endpoint);
        prop_assert_eq!(
            mirrored,
            format!("{}/extensions/{}", endpoint.trim_end_matches('/'), artifact)
        );
    }
}
