fn main() {
    #[cfg(windows)]
    {
        let mut res = winres::WindowsResource::new();
        res.set_icon("assets/worldmap-icon.ico");
        res.compile().unwrap();
    }
}
