//! Routing `url::Url` paths through a radix tree with parameters
use radix_params::SyncTree;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Handler {
    Index,
    ListUsers,
    NewUser,
    ShowUser,
    UserPost,
    Asset,
}

fn main() {
    let router = SyncTree::new();
    router.add("/", Handler::Index).unwrap();
    router.add("/users", Handler::ListUsers).unwrap();
    router.add("/users/new", Handler::NewUser).unwrap();
    router.add("/users/@id", Handler::ShowUser).unwrap();
    router.add("/users/@id/posts/@post", Handler::UserPost).unwrap();
    router.add("/assets/*file", Handler::Asset).unwrap();

    let requests = [
        "https://example.com/",
        "https://example.com/users",
        "https://example.com/users/new",
        "https://example.com/users/42?tab=posts",
        "https://example.com/users/42/posts/7",
        "https://example.com/assets/css/site.css",
        "https://example.com/missing",
    ];

    for request in &requests {
        let url = Url::parse(request).unwrap();
        match router.get(url.path()) {
            (Some(handler), params) => println!("{} -> {:?} {:?}", url.path(), handler, params),
            (None, _) => println!("{} -> 404", url.path()),
        }
    }

    assert_eq!(router.get("/users/new").0, Some(Handler::NewUser));
    // "new" is matched first and the lookup does not back out of it.
    assert_eq!(router.get("/users/newbie").0, None);
    assert_eq!(router.get("/users/bob").0, Some(Handler::ShowUser));
    println!("{}", router);
}
